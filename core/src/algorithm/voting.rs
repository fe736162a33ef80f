//! Boyer-Moore majority voting
//!
//! One step per element. When the counter is zero before an element is
//! processed, that element becomes the candidate; otherwise the counter goes
//! up on a match and down on a mismatch. A final verification pass counts the
//! candidate's occurrences, since the vote alone does not prove a majority.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::execution::step::{Snapshot, StepKind, VoteSnapshot};
use crate::execution::tracer::TraceRecorder;

/// Majority Element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorityVote {
    pub values: Vec<i64>,
}

impl StepGenerator for MajorityVote {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::MajorityVote
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let values: Arc<[i64]> = self.values.as_slice().into();
        let mut candidate: Option<i64> = None;
        let mut count = 0usize;

        for (position, &value) in values.iter().enumerate() {
            let (kind, narration) = if count == 0 {
                candidate = Some(value);
                count = 1;
                (
                    StepKind::Reassign,
                    format!("The counter is 0, so {value} becomes the candidate with count 1."),
                )
            } else if candidate == Some(value) {
                count += 1;
                (
                    StepKind::Increment,
                    format!("{value} matches the candidate; count rises to {count}."),
                )
            } else {
                count -= 1;
                (
                    StepKind::Decrement,
                    format!("{value} differs from the candidate; count drops to {count}."),
                )
            };

            recorder.record(
                kind,
                Snapshot::Vote(VoteSnapshot {
                    values: Arc::clone(&values),
                    position: Some(position),
                    candidate,
                    count,
                    occurrences: None,
                    is_majority: None,
                }),
                narration,
            )?;
        }

        let occurrences = candidate.map(|c| values.iter().filter(|v| **v == c).count());
        let is_majority = occurrences.map(|o| o * 2 > values.len());
        let narration = match (candidate, occurrences, is_majority) {
            (Some(c), Some(o), Some(true)) => {
                format!("The candidate {c} appears {o} of {} times, a strict majority.", values.len())
            }
            (Some(c), Some(o), _) => {
                format!("The candidate {c} appears only {o} of {} times; there is no majority.", values.len())
            }
            _ => "The array is empty, so there is no candidate.".to_string(),
        };

        recorder.record(
            StepKind::Done,
            Snapshot::Vote(VoteSnapshot {
                values: Arc::clone(&values),
                position: None,
                candidate,
                count,
                occurrences,
                is_majority,
            }),
            narration,
        )?;
        if is_majority == Some(true) {
            recorder.mark_last_best();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::execution::step::StepTrace;

    fn vote(trace: &StepTrace, index: usize) -> &VoteSnapshot {
        match &trace.steps()[index].snapshot {
            Snapshot::Vote(v) => v,
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_classic_input_ends_with_two() {
        let trace = MajorityVote {
            values: vec![2, 2, 1, 1, 1, 2, 2],
        }
        .generate(&GeneratorLimits::default());

        assert_eq!(trace.len(), 8);
        let done = vote(&trace, trace.last_index());
        assert_eq!(done.candidate, Some(2));
        assert_eq!(done.occurrences, Some(4));
        assert_eq!(done.is_majority, Some(true));
    }

    #[test]
    fn test_reassign_only_when_counter_is_zero() {
        let trace = MajorityVote {
            values: vec![2, 2, 1, 1, 1, 2, 2],
        }
        .generate(&GeneratorLimits::default());

        let kinds: Vec<_> = trace.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Reassign,
                StepKind::Increment,
                StepKind::Decrement,
                StepKind::Decrement,
                StepKind::Reassign,
                StepKind::Decrement,
                StepKind::Reassign,
                StepKind::Done,
            ]
        );
        assert_eq!(vote(&trace, 4).candidate, Some(1));
    }

    #[test]
    fn test_verification_rejects_plurality() {
        let trace = MajorityVote { values: vec![1, 2, 3] }.generate(&GeneratorLimits::default());
        let done = vote(&trace, trace.last_index());
        assert_eq!(done.candidate, Some(3));
        assert_eq!(done.is_majority, Some(false));
        assert!(trace.best_step().is_none());
    }

    #[test]
    fn test_empty_input() {
        let trace = MajorityVote { values: vec![] }.generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert_eq!(vote(&trace, 0).candidate, None);
    }
}
