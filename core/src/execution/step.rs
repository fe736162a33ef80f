//! Step and trace model for the algotrace simulator
//!
//! A `StepTrace` is the complete, immutable record of one algorithm run over
//! one input set. Every `Step` carries a tagged `Snapshot` holding exactly the
//! state a view needs to render that moment, so steps can be rendered in any
//! order without consulting their neighbours.
//!
//! # Invariants
//! - Indices are 0-based, contiguous and strictly increasing
//! - A trace holds at least one step and exactly one terminal step (the last)
//! - At most one step is flagged as best
//! - Snapshots contain ordered collections only, so serialization is stable
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::AlgorithmId;

/// Phase tag attached to every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Two pointers compared and a metric evaluated
    Compare,
    /// Right bound of a window moved over one more element
    Expand,
    /// Left bound of a window released one element
    Contract,
    /// Voting candidate replaced because the counter was exhausted
    Reassign,
    /// Voting counter incremented on a match
    Increment,
    /// Voting counter decremented on a mismatch
    Decrement,
    /// Sieve candidate inspected
    Checking,
    /// Sieve multiple crossed out
    Marking,
    /// Cache lookup
    Read,
    /// Cache insert or update without eviction
    Write,
    /// Cache insert that pushed out the least recently used entry
    Evict,
    /// One column of a carry-propagating addition
    AddDigit,
    /// Slow and fast pointers moved without meeting
    Advance,
    /// Slow and fast pointers landed on the same node
    Meet,
    /// Fast pointer ran off the end of the list
    Exhausted,
    /// Binary search midpoint inspected
    Probe,
    /// One element of a cartesian product emitted
    Combine,
    /// Running subarray extended by one element
    Extend,
    /// Running subarray restarted at the current element
    Restart,
    /// Summary of the final result
    Done,
    /// Input rejected before simulation
    Invalid,
    /// Input too large to simulate step by step
    Overflow,
}

impl StepKind {
    /// Stable machine-readable label
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Compare => "compare",
            StepKind::Expand => "expand",
            StepKind::Contract => "contract",
            StepKind::Reassign => "reassign",
            StepKind::Increment => "increment",
            StepKind::Decrement => "decrement",
            StepKind::Checking => "checking",
            StepKind::Marking => "marking",
            StepKind::Read => "read",
            StepKind::Write => "write",
            StepKind::Evict => "evict",
            StepKind::AddDigit => "add_digit",
            StepKind::Advance => "advance",
            StepKind::Meet => "meet",
            StepKind::Exhausted => "exhausted",
            StepKind::Probe => "probe",
            StepKind::Combine => "combine",
            StepKind::Extend => "extend",
            StepKind::Restart => "restart",
            StepKind::Done => "done",
            StepKind::Invalid => "invalid",
            StepKind::Overflow => "overflow",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which pointer of a pair moves next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Two pointers walking inward over a shared array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    pub values: Arc<[i64]>,
    pub left: usize,
    pub right: usize,
    /// Metric evaluated at this step (area, sum, ...)
    pub metric: i64,
    /// Best metric seen so far, including this step
    pub best: i64,
    /// Goal value for target-seeking scans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    /// Pointer that moves after this step, `None` once the scan has stopped
    pub next_move: Option<Side>,
}

/// Best window found so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub start: usize,
    pub len: usize,
    pub text: String,
}

/// Half-open window `[start, end)` over the characters of a source string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub source: Arc<str>,
    pub start: usize,
    pub end: usize,
    pub window: String,
    /// Character frequencies inside the window
    pub counts: BTreeMap<char, usize>,
    /// Required multiplicities, empty when the window has no target
    pub requirement: BTreeMap<char, usize>,
    /// Distinct required characters currently satisfied
    pub satisfied: usize,
    pub valid: bool,
    pub best: Option<WindowSpan>,
}

/// Boyer-Moore voting state after processing `position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSnapshot {
    pub values: Arc<[i64]>,
    pub position: Option<usize>,
    pub candidate: Option<i64>,
    pub count: usize,
    /// Occurrences of the candidate, filled in by the verification pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_majority: Option<bool>,
}

/// Sieve table for the integers `0..=n`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieveSnapshot {
    pub n: usize,
    /// Candidate whose multiples are being processed
    pub candidate: Option<usize>,
    /// Multiple touched at this step
    pub marking: Option<usize>,
    /// False when `marking` had already been crossed out by a smaller prime
    pub newly_marked: bool,
    pub composite: Vec<bool>,
    /// Filled in once the sieve has finished
    pub primes: Vec<usize>,
}

/// Key/value pair held by the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: i64,
    pub value: i64,
}

/// Cache operation replayed by an LRU trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CacheOp {
    Get { key: i64 },
    Put { key: i64, value: i64 },
}

impl fmt::Display for CacheOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheOp::Get { key } => write!(f, "get({key})"),
            CacheOp::Put { key, value } => write!(f, "put({key}, {value})"),
        }
    }
}

/// What a single cache operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CacheOutcome {
    Hit { value: i64 },
    Miss,
    Inserted,
    Updated { previous: i64 },
}

/// Cache contents ordered from least to most recently used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub capacity: usize,
    pub entries: Vec<CacheEntry>,
    pub op: Option<CacheOp>,
    pub outcome: Option<CacheOutcome>,
    pub evicted: Option<CacheEntry>,
}

/// How the operands of an addition are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    Binary,
    Decimal,
    /// Decimal digits stored least significant first in a linked list
    LinkedList,
}

impl Notation {
    pub fn base(self) -> u32 {
        match self {
            Notation::Binary => 2,
            Notation::Decimal | Notation::LinkedList => 10,
        }
    }
}

/// Column-by-column addition state; all digit vectors are least significant first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrySnapshot {
    pub notation: Notation,
    pub a: Vec<u8>,
    pub b: Vec<u8>,
    pub column: usize,
    pub digit_a: Option<u8>,
    pub digit_b: Option<u8>,
    pub carry_in: u32,
    pub carry_out: u32,
    pub result: Vec<u8>,
}

impl CarrySnapshot {
    /// Result digits rendered most significant first
    pub fn result_text(&self) -> String {
        digits_to_text(&self.result)
    }
}

/// Renders least-significant-first digits as a conventional numeral
pub fn digits_to_text(digits: &[u8]) -> String {
    if digits.is_empty() {
        return "0".to_string();
    }
    digits
        .iter()
        .rev()
        .map(|d| char::from_digit(u32::from(*d), 10).unwrap_or('?'))
        .collect()
}

/// Final verdict of a cycle search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum CycleVerdict {
    CycleFound { meeting_node: usize },
    NoCycle,
}

/// Slow/fast pointer positions over an arena linked list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub values: Arc<[i64]>,
    /// Node the tail links back to, if any
    pub cycle_entry: Option<usize>,
    pub tick: usize,
    pub slow: Option<usize>,
    pub fast: Option<usize>,
    pub verdict: Option<CycleVerdict>,
}

/// Binary search over the half-open range `[lo, hi)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub values: Arc<[i64]>,
    pub target: i64,
    pub lo: usize,
    pub hi: usize,
    pub mid: Option<usize>,
    pub found: Option<usize>,
}

/// Kadane running state after processing `position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubarraySnapshot {
    pub values: Arc<[i64]>,
    pub position: usize,
    pub run_start: usize,
    pub running_sum: i64,
    pub best_sum: i64,
    /// Inclusive bounds of the best subarray
    pub best_range: (usize, usize),
}

/// Cartesian product enumeration state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub digits: String,
    /// Letter index chosen for each digit, empty before the first combination
    pub choice: Vec<usize>,
    pub current: Option<String>,
    /// Full enumeration order; the first `emitted` entries have been produced
    pub combinations: Arc<[String]>,
    pub emitted: usize,
}

/// Explanation attached to a trace that could not be simulated normally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegenerateSnapshot {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<usize>,
}

/// Algorithm-specific render state, tagged by family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Snapshot {
    Pointers(PointerSnapshot),
    Window(WindowSnapshot),
    Vote(VoteSnapshot),
    Sieve(SieveSnapshot),
    Cache(CacheSnapshot),
    Carry(CarrySnapshot),
    Cycle(CycleSnapshot),
    Search(SearchSnapshot),
    Subarray(SubarraySnapshot),
    Product(ProductSnapshot),
    Degenerate(DegenerateSnapshot),
}

/// One inspectable moment of an algorithm's execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub kind: StepKind,
    pub snapshot: Snapshot,
    pub narration: String,
    #[serde(default)]
    pub is_best: bool,
    #[serde(default)]
    pub is_terminal: bool,
}

/// How a trace came to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TraceOutcome {
    /// The algorithm ran to completion
    Complete,
    /// The input was rejected; the single step explains why
    InvalidInput { reason: String },
    /// The input is too large to step through
    NotSimulatable { limit: usize, required: usize },
}

/// Immutable, ordered sequence of steps for one input set
///
/// Construction goes through `TraceRecorder`, which upholds the index and
/// terminal invariants. Once built a trace is only ever shared, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTrace {
    algorithm: AlgorithmId,
    outcome: TraceOutcome,
    steps: Arc<[Step]>,
}

impl StepTrace {
    pub(crate) fn from_parts(algorithm: AlgorithmId, outcome: TraceOutcome, steps: Vec<Step>) -> Self {
        debug_assert!(!steps.is_empty(), "a trace always holds at least one step");
        debug_assert!(steps.iter().enumerate().all(|(i, s)| s.index == i));
        Self {
            algorithm,
            outcome,
            steps: steps.into(),
        }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn outcome(&self) -> &TraceOutcome {
        &self.outcome
    }

    /// True unless the input was rejected or too large
    pub fn is_simulated(&self) -> bool {
        matches!(self.outcome, TraceOutcome::Complete)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a trace built by the recorder
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Terminal step carrying the final result
    pub fn terminal(&self) -> &Step {
        &self.steps[self.last_index()]
    }

    pub fn best_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.is_best)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Stable JSON encoding, used by hosts and by determinism checks
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degenerate_step(index: usize) -> Step {
        Step {
            index,
            kind: StepKind::Done,
            snapshot: Snapshot::Degenerate(DegenerateSnapshot {
                reason: "nothing to do".to_string(),
                limit: None,
                required: None,
            }),
            narration: "Nothing to do".to_string(),
            is_best: false,
            is_terminal: true,
        }
    }

    #[test]
    fn test_step_kind_labels_match_serde_names() {
        for kind in [StepKind::AddDigit, StepKind::Compare, StepKind::Exhausted, StepKind::Overflow] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.label()));
        }
    }

    #[test]
    fn test_snapshot_is_tagged_by_family() {
        let json = serde_json::to_value(&degenerate_step(0)).unwrap();
        assert_eq!(json["snapshot"]["family"], "degenerate");
        assert_eq!(json["kind"], "done");
    }

    #[test]
    fn test_trace_accessors() {
        let trace = StepTrace::from_parts(
            AlgorithmId::MaxArea,
            TraceOutcome::Complete,
            vec![degenerate_step(0)],
        );

        assert_eq!(trace.len(), 1);
        assert!(!trace.is_empty());
        assert_eq!(trace.last_index(), 0);
        assert!(trace.terminal().is_terminal);
        assert!(trace.best_step().is_none());
        assert!(trace.is_simulated());
    }

    #[test]
    fn test_digits_to_text() {
        assert_eq!(digits_to_text(&[]), "0");
        assert_eq!(digits_to_text(&[7, 0, 8]), "807");
        assert_eq!(digits_to_text(&[0, 0, 1]), "100");
    }
}
