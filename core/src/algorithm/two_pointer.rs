//! Two-pointer scans
//!
//! Both scans start with one pointer at each end of the input and move
//! exactly one pointer inward per comparison. Each comparison is one step.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::data_structures::pointers::PointerPair;
use crate::execution::step::{PointerSnapshot, Side, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

/// Container With Most Water
///
/// On equal heights the left pointer advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxArea {
    pub heights: Vec<i64>,
}

impl StepGenerator for MaxArea {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::MaxArea
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        if let Some(h) = self.heights.iter().find(|h| **h < 0) {
            return Err(GeneratorError::invalid(format!("heights must be non-negative, found {h}")));
        }

        let values: Arc<[i64]> = self.heights.as_slice().into();
        let mut pair = match PointerPair::spanning(values.len()) {
            Some(pair) if pair.is_open() => pair,
            _ => {
                recorder.record(
                    StepKind::Done,
                    Snapshot::Pointers(PointerSnapshot {
                        values: Arc::clone(&values),
                        left: 0,
                        right: values.len().saturating_sub(1),
                        metric: 0,
                        best: 0,
                        target: None,
                        next_move: None,
                    }),
                    "At least two lines are needed to hold water, so the best area is 0.",
                )?;
                return Ok(());
            }
        };

        let mut best = i64::MIN;
        while pair.is_open() {
            let (lh, rh) = (values[pair.left], values[pair.right]);
            let area = lh.min(rh).saturating_mul(pair.width() as i64);
            let improved = area > best;
            if improved {
                best = area;
            }

            let side = if lh <= rh { Side::Left } else { Side::Right };
            let mut next = pair;
            next.advance(side);
            let next_move = next.is_open().then_some(side);

            let narration = format!(
                "Lines {} (height {}) and {} (height {}) hold min({}, {}) x {} = {}. {} {}",
                pair.left,
                lh,
                pair.right,
                rh,
                lh,
                rh,
                pair.width(),
                area,
                if improved {
                    format!("New best area {best}.")
                } else {
                    format!("Best stays {best}.")
                },
                match next_move {
                    Some(Side::Left) if lh == rh => "Heights are equal, so the left pointer moves.",
                    Some(Side::Left) => "The left line is shorter, so the left pointer moves.",
                    Some(Side::Right) => "The right line is shorter, so the right pointer moves.",
                    None => "The pointers meet; the scan is over.",
                }
            );

            recorder.record(
                StepKind::Compare,
                Snapshot::Pointers(PointerSnapshot {
                    values: Arc::clone(&values),
                    left: pair.left,
                    right: pair.right,
                    metric: area,
                    best,
                    target: None,
                    next_move,
                }),
                narration,
            )?;
            if improved {
                recorder.mark_last_best();
            }

            pair = next;
        }

        Ok(())
    }
}

/// Two Sum over an ascending array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSum {
    pub values: Vec<i64>,
    pub target: i64,
}

impl StepGenerator for PairSum {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::PairSum
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        if self.values.windows(2).any(|w| w[0] > w[1]) {
            return Err(GeneratorError::invalid("values must be sorted in ascending order"));
        }

        let values: Arc<[i64]> = self.values.as_slice().into();
        let snapshot = |pair: PointerPair, sum: i64, next_move: Option<Side>| {
            Snapshot::Pointers(PointerSnapshot {
                values: Arc::clone(&values),
                left: pair.left,
                right: pair.right,
                metric: sum,
                best: sum,
                target: Some(self.target),
                next_move,
            })
        };

        let mut pair = match PointerPair::spanning(values.len()) {
            Some(pair) => pair,
            None => {
                recorder.record(
                    StepKind::Done,
                    snapshot(PointerPair { left: 0, right: 0 }, 0, None),
                    "The array is empty, so no pair can reach the target.",
                )?;
                return Ok(());
            }
        };

        while pair.is_open() {
            let (lv, rv) = (values[pair.left], values[pair.right]);
            let sum = lv.saturating_add(rv);

            if sum == self.target {
                recorder.record(
                    StepKind::Compare,
                    snapshot(pair, sum, None),
                    format!(
                        "{} + {} = {} matches the target. Answer: indices {} and {}.",
                        lv, rv, sum, pair.left, pair.right
                    ),
                )?;
                recorder.mark_last_best();
                return Ok(());
            }

            let side = if sum < self.target { Side::Left } else { Side::Right };
            recorder.record(
                StepKind::Compare,
                snapshot(pair, sum, Some(side)),
                if side == Side::Left {
                    format!("{lv} + {rv} = {sum} is below {}; move the left pointer right.", self.target)
                } else {
                    format!("{lv} + {rv} = {sum} is above {}; move the right pointer left.", self.target)
                },
            )?;
            pair.advance(side);
        }

        recorder.record(
            StepKind::Done,
            snapshot(pair, 0, None),
            format!("The pointers met without finding a pair that sums to {}.", self.target),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::execution::step::{StepTrace, TraceOutcome};

    fn pointers(trace: &StepTrace, index: usize) -> &PointerSnapshot {
        match &trace.steps()[index].snapshot {
            Snapshot::Pointers(p) => p,
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_classic_heights_take_eight_steps() {
        let input = MaxArea {
            heights: vec![1, 8, 6, 2, 5, 4, 8, 3, 7],
        };
        let trace = input.generate(&GeneratorLimits::default());

        assert_eq!(trace.len(), 8);
        assert!(trace.iter().all(|s| s.kind == StepKind::Compare));
        assert_eq!(pointers(&trace, 7).best, 49);
        assert!(trace.terminal().is_terminal);

        let best = trace.best_step().unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(pointers(&trace, 1).metric, 49);
    }

    #[test]
    fn test_equal_heights_advance_left() {
        let trace = MaxArea { heights: vec![4, 1, 4] }.generate(&GeneratorLimits::default());
        let first = pointers(&trace, 0);
        assert_eq!(first.next_move, Some(Side::Left));
        assert_eq!(pointers(&trace, 1).left, 1);
        assert_eq!(pointers(&trace, 1).right, 2);
    }

    #[test]
    fn test_short_input_is_single_done_step() {
        for heights in [vec![], vec![5]] {
            let trace = MaxArea { heights }.generate(&GeneratorLimits::default());
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.terminal().kind, StepKind::Done);
            assert_eq!(trace.outcome(), &TraceOutcome::Complete);
        }
    }

    #[test]
    fn test_negative_height_is_invalid() {
        let trace = MaxArea { heights: vec![1, -2] }.generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert!(matches!(trace.outcome(), TraceOutcome::InvalidInput { .. }));
    }

    #[test]
    fn test_pair_sum_finds_pair() {
        let trace = PairSum {
            values: vec![2, 7, 11, 15],
            target: 9,
        }
        .generate(&GeneratorLimits::default());

        // 2+15, 2+11, 2+7
        assert_eq!(trace.len(), 3);
        let last = pointers(&trace, 2);
        assert_eq!((last.left, last.right), (0, 1));
        assert!(trace.terminal().is_best);
    }

    #[test]
    fn test_pair_sum_without_match() {
        let trace = PairSum {
            values: vec![1, 2, 3],
            target: 100,
        }
        .generate(&GeneratorLimits::default());

        assert_eq!(trace.terminal().kind, StepKind::Done);
        assert!(trace.best_step().is_none());
    }

    #[test]
    fn test_pair_sum_rejects_unsorted() {
        let trace = PairSum {
            values: vec![3, 1],
            target: 4,
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(trace.terminal().kind, StepKind::Invalid);
    }
}
