//! algotrace algorithm catalogue
//!
//! Every simulated algorithm is a plain input record implementing
//! `StepGenerator`. `AlgorithmInput` gathers them behind one serde-tagged
//! enum so hosts can hand over parameters as data.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod carry;
pub mod combinations;
pub mod cycle;
pub mod lru;
pub mod search;
pub mod sieve;
pub mod sliding_window;
pub mod subarray;
pub mod traits;
pub mod two_pointer;
pub mod voting;

use log::debug;
use serde::{Deserialize, Serialize};

pub use self::carry::{AddBinary, AddLinkedLists, AddStrings};
pub use self::combinations::LetterCombinations;
pub use self::cycle::CycleDetection;
pub use self::lru::LruCache;
pub use self::search::BinarySearch;
pub use self::sieve::PrimeSieve;
pub use self::sliding_window::{LongestUniqueSubstring, MinimumWindowSubstring};
pub use self::subarray::MaxSubarray;
pub use self::traits::*;
pub use self::two_pointer::{MaxArea, PairSum};
pub use self::voting::MajorityVote;

use crate::config::GeneratorLimits;
use crate::execution::step::StepTrace;
use crate::execution::tracer::TraceRecorder;

/// Parameters for any supported algorithm, tagged by `"algorithm"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmInput {
    MaxArea(MaxArea),
    PairSum(PairSum),
    LongestUniqueSubstring(LongestUniqueSubstring),
    MinimumWindowSubstring(MinimumWindowSubstring),
    MajorityVote(MajorityVote),
    PrimeSieve(PrimeSieve),
    LruCache(LruCache),
    AddBinary(AddBinary),
    AddStrings(AddStrings),
    AddLinkedLists(AddLinkedLists),
    CycleDetection(CycleDetection),
    BinarySearch(BinarySearch),
    MaxSubarray(MaxSubarray),
    LetterCombinations(LetterCombinations),
}

impl AlgorithmInput {
    fn generator(&self) -> &dyn StepGenerator {
        match self {
            AlgorithmInput::MaxArea(g) => g,
            AlgorithmInput::PairSum(g) => g,
            AlgorithmInput::LongestUniqueSubstring(g) => g,
            AlgorithmInput::MinimumWindowSubstring(g) => g,
            AlgorithmInput::MajorityVote(g) => g,
            AlgorithmInput::PrimeSieve(g) => g,
            AlgorithmInput::LruCache(g) => g,
            AlgorithmInput::AddBinary(g) => g,
            AlgorithmInput::AddStrings(g) => g,
            AlgorithmInput::AddLinkedLists(g) => g,
            AlgorithmInput::CycleDetection(g) => g,
            AlgorithmInput::BinarySearch(g) => g,
            AlgorithmInput::MaxSubarray(g) => g,
            AlgorithmInput::LetterCombinations(g) => g,
        }
    }
}

impl StepGenerator for AlgorithmInput {
    fn id(&self) -> AlgorithmId {
        self.generator().id()
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        self.generator().record(recorder)
    }
}

/// Builds a trace from a JSON parameter document
///
/// A document that does not parse becomes an invalid-input trace for
/// `fallback`, so the host still has something to render.
pub fn generate_from_json(json: &str, fallback: AlgorithmId, limits: &GeneratorLimits) -> StepTrace {
    match serde_json::from_str::<AlgorithmInput>(json) {
        Ok(input) => {
            debug!("parsed parameters for {}", input.id());
            input.generate(limits)
        }
        Err(err) => TraceRecorder::run(fallback, limits, |_| {
            Err(GeneratorError::invalid(format!("parameters could not be read ({err})")))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::step::{CacheOp, Snapshot, StepKind, TraceOutcome};

    fn catalogue() -> Vec<AlgorithmInput> {
        vec![
            AlgorithmInput::MaxArea(MaxArea {
                heights: vec![1, 8, 6, 2, 5, 4, 8, 3, 7],
            }),
            AlgorithmInput::PairSum(PairSum {
                values: vec![1, 3, 4, 6, 9],
                target: 13,
            }),
            AlgorithmInput::LongestUniqueSubstring(LongestUniqueSubstring {
                text: "pwwkew".to_string(),
            }),
            AlgorithmInput::MinimumWindowSubstring(MinimumWindowSubstring {
                source: "ADOBECODEBANC".to_string(),
                pattern: "ABC".to_string(),
            }),
            AlgorithmInput::MajorityVote(MajorityVote {
                values: vec![3, 2, 3],
            }),
            AlgorithmInput::PrimeSieve(PrimeSieve { n: 50 }),
            AlgorithmInput::LruCache(LruCache {
                capacity: 2,
                ops: vec![
                    CacheOp::Put { key: 1, value: 1 },
                    CacheOp::Put { key: 2, value: 2 },
                    CacheOp::Get { key: 1 },
                    CacheOp::Put { key: 3, value: 3 },
                    CacheOp::Get { key: 2 },
                ],
            }),
            AlgorithmInput::AddBinary(AddBinary {
                a: "1010".to_string(),
                b: "1011".to_string(),
            }),
            AlgorithmInput::AddStrings(AddStrings {
                a: "999".to_string(),
                b: "1".to_string(),
            }),
            AlgorithmInput::AddLinkedLists(AddLinkedLists {
                a: vec![9, 9, 9],
                b: vec![9],
            }),
            AlgorithmInput::CycleDetection(CycleDetection {
                values: vec![3, 2, 0, -4],
                cycle_position: 1,
            }),
            AlgorithmInput::BinarySearch(BinarySearch {
                values: vec![1, 2, 3, 4, 5, 6, 7],
                target: 6,
            }),
            AlgorithmInput::MaxSubarray(MaxSubarray {
                values: vec![5, 4, -1, 7, 8],
            }),
            AlgorithmInput::LetterCombinations(LetterCombinations {
                digits: "79".to_string(),
            }),
        ]
    }

    #[test]
    fn test_catalogue_covers_every_algorithm() {
        let ids: Vec<_> = catalogue().iter().map(|i| i.id()).collect();
        assert_eq!(ids, AlgorithmId::ALL.to_vec());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let limits = GeneratorLimits::default();
        for input in catalogue() {
            let first = input.generate(&limits);
            let second = input.clone().generate(&limits);
            assert_eq!(first, second, "{} differs between runs", input.id());
            assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        }
    }

    #[test]
    fn test_every_trace_upholds_shape_invariants() {
        let limits = GeneratorLimits::default();
        for input in catalogue() {
            let trace = input.generate(&limits);
            assert!(!trace.is_empty());
            assert_eq!(trace.algorithm(), input.id());
            assert_eq!(trace.outcome(), &TraceOutcome::Complete, "{}", input.id());
            assert!(trace.iter().filter(|s| s.is_best).count() <= 1);
            assert_eq!(trace.iter().filter(|s| s.is_terminal).count(), 1);
            for (i, step) in trace.iter().enumerate() {
                assert_eq!(step.index, i);
                assert!(!step.narration.is_empty());
            }
        }
    }

    #[test]
    fn test_tiny_budget_degrades_every_algorithm() {
        let limits = GeneratorLimits::with_max_steps(1);
        for input in catalogue() {
            let trace = input.generate(&limits);
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.terminal().kind, StepKind::Overflow, "{}", input.id());
        }
    }

    #[test]
    fn test_generate_from_json() {
        let json = r#"{ "algorithm": "majority_vote", "values": [2, 2, 1, 1, 1, 2, 2] }"#;
        let trace = generate_from_json(json, AlgorithmId::MajorityVote, &GeneratorLimits::default());
        match &trace.terminal().snapshot {
            Snapshot::Vote(v) => assert_eq!(v.candidate, Some(2)),
            other => panic!("unexpected snapshot {other:?}"),
        }

        let json = r#"{ "algorithm": "lru_cache", "capacity": 1, "ops": [{ "op": "put", "key": 1, "value": 7 }, { "op": "get", "key": 1 }] }"#;
        let trace = generate_from_json(json, AlgorithmId::LruCache, &GeneratorLimits::default());
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn test_unreadable_json_is_invalid_input() {
        let trace = generate_from_json(
            r#"{ "algorithm": "max_area", "heights": ["x"] }"#,
            AlgorithmId::MaxArea,
            &GeneratorLimits::default(),
        );
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.algorithm(), AlgorithmId::MaxArea);
        assert!(matches!(trace.outcome(), TraceOutcome::InvalidInput { .. }));
    }
}
