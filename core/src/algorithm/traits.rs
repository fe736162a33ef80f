//! Core generator trait definitions for algotrace
//!
//! A step generator is a plain input record that knows how to replay its
//! algorithm into a `TraceRecorder`. Generation is pure, synchronous and
//! total: errors raised while recording never escape `generate`, they are
//! folded into a degenerate one-step trace.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GeneratorLimits;
use crate::execution::step::StepTrace;
use crate::execution::tracer::TraceRecorder;

/// Identifier of every simulated algorithm
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    MaxArea,
    PairSum,
    LongestUniqueSubstring,
    MinimumWindowSubstring,
    MajorityVote,
    PrimeSieve,
    LruCache,
    AddBinary,
    AddStrings,
    AddLinkedLists,
    CycleDetection,
    BinarySearch,
    MaxSubarray,
    LetterCombinations,
}

/// Technique an algorithm demonstrates
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmFamily {
    TwoPointer,
    SlidingWindow,
    Voting,
    Sieve,
    Eviction,
    CarryPropagation,
    CycleDetection,
    DivideAndConquer,
    DynamicProgramming,
    CartesianProduct,
}

/// Asymptotic cost shown next to a walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmComplexity {
    pub time: &'static str,
    pub space: &'static str,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 14] = [
        AlgorithmId::MaxArea,
        AlgorithmId::PairSum,
        AlgorithmId::LongestUniqueSubstring,
        AlgorithmId::MinimumWindowSubstring,
        AlgorithmId::MajorityVote,
        AlgorithmId::PrimeSieve,
        AlgorithmId::LruCache,
        AlgorithmId::AddBinary,
        AlgorithmId::AddStrings,
        AlgorithmId::AddLinkedLists,
        AlgorithmId::CycleDetection,
        AlgorithmId::BinarySearch,
        AlgorithmId::MaxSubarray,
        AlgorithmId::LetterCombinations,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::MaxArea => "Container With Most Water",
            AlgorithmId::PairSum => "Two Sum (sorted input)",
            AlgorithmId::LongestUniqueSubstring => "Longest Substring Without Repeating Characters",
            AlgorithmId::MinimumWindowSubstring => "Minimum Window Substring",
            AlgorithmId::MajorityVote => "Majority Element (Boyer-Moore)",
            AlgorithmId::PrimeSieve => "Sieve of Eratosthenes",
            AlgorithmId::LruCache => "LRU Cache",
            AlgorithmId::AddBinary => "Add Binary",
            AlgorithmId::AddStrings => "Add Strings",
            AlgorithmId::AddLinkedLists => "Add Two Numbers (linked lists)",
            AlgorithmId::CycleDetection => "Linked List Cycle (Floyd)",
            AlgorithmId::BinarySearch => "Binary Search",
            AlgorithmId::MaxSubarray => "Maximum Subarray (Kadane)",
            AlgorithmId::LetterCombinations => "Letter Combinations of a Phone Number",
        }
    }

    pub fn family(self) -> AlgorithmFamily {
        match self {
            AlgorithmId::MaxArea | AlgorithmId::PairSum => AlgorithmFamily::TwoPointer,
            AlgorithmId::LongestUniqueSubstring | AlgorithmId::MinimumWindowSubstring => {
                AlgorithmFamily::SlidingWindow
            }
            AlgorithmId::MajorityVote => AlgorithmFamily::Voting,
            AlgorithmId::PrimeSieve => AlgorithmFamily::Sieve,
            AlgorithmId::LruCache => AlgorithmFamily::Eviction,
            AlgorithmId::AddBinary | AlgorithmId::AddStrings | AlgorithmId::AddLinkedLists => {
                AlgorithmFamily::CarryPropagation
            }
            AlgorithmId::CycleDetection => AlgorithmFamily::CycleDetection,
            AlgorithmId::BinarySearch => AlgorithmFamily::DivideAndConquer,
            AlgorithmId::MaxSubarray => AlgorithmFamily::DynamicProgramming,
            AlgorithmId::LetterCombinations => AlgorithmFamily::CartesianProduct,
        }
    }

    pub fn complexity(self) -> AlgorithmComplexity {
        let (time, space) = match self {
            AlgorithmId::MaxArea | AlgorithmId::PairSum => ("O(n)", "O(1)"),
            AlgorithmId::LongestUniqueSubstring => ("O(n)", "O(min(n, alphabet))"),
            AlgorithmId::MinimumWindowSubstring => ("O(|s| + |t|)", "O(alphabet)"),
            AlgorithmId::MajorityVote => ("O(n)", "O(1)"),
            AlgorithmId::PrimeSieve => ("O(n log log n)", "O(n)"),
            AlgorithmId::LruCache => ("O(1) per operation", "O(capacity)"),
            AlgorithmId::AddBinary | AlgorithmId::AddStrings | AlgorithmId::AddLinkedLists => {
                ("O(max(m, n))", "O(max(m, n))")
            }
            AlgorithmId::CycleDetection => ("O(n)", "O(1)"),
            AlgorithmId::BinarySearch => ("O(log n)", "O(1)"),
            AlgorithmId::MaxSubarray => ("O(n)", "O(1)"),
            AlgorithmId::LetterCombinations => ("O(4^n * n)", "O(4^n * n)"),
        };
        AlgorithmComplexity { time, space }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a generator stops before producing a regular trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Not simulatable at this size: {required} steps needed, limit is {limit}")]
    GenerationOverflow { limit: usize, required: usize },
}

impl GeneratorError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeneratorError::InvalidInput { reason: reason.into() }
    }
}

/// Replays one algorithm over one input set
///
/// # Invariants
/// - `record` is deterministic: identical inputs record identical steps
/// - `record` never panics on malformed input; it returns `InvalidInput`
pub trait StepGenerator: Debug {
    /// Algorithm this input belongs to
    fn id(&self) -> AlgorithmId;

    /// Records every step of the run
    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError>;

    /// Builds the complete trace; never fails
    fn generate(&self, limits: &GeneratorLimits) -> StepTrace {
        TraceRecorder::run(self.id(), limits, |recorder| self.record(recorder))
    }
}
