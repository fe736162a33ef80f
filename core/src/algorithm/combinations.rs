//! Letter combinations of a phone number
//!
//! Enumerates the cartesian product of the keypad letters in odometer order,
//! last digit fastest, one `combine` step per combination. The number of
//! combinations is known before enumeration starts, so oversized inputs are
//! refused up front instead of being cut off halfway.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::execution::step::{ProductSnapshot, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

fn keypad(digit: char) -> Option<&'static [char]> {
    let letters: &'static [char] = match digit {
        '2' => &['a', 'b', 'c'],
        '3' => &['d', 'e', 'f'],
        '4' => &['g', 'h', 'i'],
        '5' => &['j', 'k', 'l'],
        '6' => &['m', 'n', 'o'],
        '7' => &['p', 'q', 'r', 's'],
        '8' => &['t', 'u', 'v'],
        '9' => &['w', 'x', 'y', 'z'],
        _ => return None,
    };
    Some(letters)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCombinations {
    pub digits: String,
}

impl StepGenerator for LetterCombinations {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::LetterCombinations
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let groups = self
            .digits
            .chars()
            .map(|d| {
                keypad(d).ok_or_else(|| GeneratorError::invalid(format!("'{d}' has no letters on the keypad; use digits 2-9")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = if groups.is_empty() {
            0
        } else {
            groups
                .iter()
                .try_fold(1usize, |acc, g| acc.checked_mul(g.len()))
                .unwrap_or(usize::MAX)
        };
        recorder.ensure_budget(total.saturating_add(1))?;

        let mut choice = vec![0usize; groups.len()];
        let mut combinations = Vec::with_capacity(total);
        let mut choices = Vec::with_capacity(total);
        for _ in 0..total {
            combinations.push(choice.iter().zip(&groups).map(|(i, g)| g[*i]).collect::<String>());
            choices.push(choice.clone());
            // odometer: bump the last position, carrying leftwards
            for pos in (0..choice.len()).rev() {
                choice[pos] += 1;
                if choice[pos] < groups[pos].len() {
                    break;
                }
                choice[pos] = 0;
            }
        }
        let combinations: Arc<[String]> = combinations.into();

        for (emitted, choice) in choices.into_iter().enumerate() {
            let current = combinations[emitted].clone();
            recorder.record(
                StepKind::Combine,
                Snapshot::Product(ProductSnapshot {
                    digits: self.digits.clone(),
                    choice,
                    current: Some(current.clone()),
                    combinations: Arc::clone(&combinations),
                    emitted: emitted + 1,
                }),
                format!("Combination {} of {total}: \"{current}\".", emitted + 1),
            )?;
        }

        recorder.record(
            StepKind::Done,
            Snapshot::Product(ProductSnapshot {
                digits: self.digits.clone(),
                choice: Vec::new(),
                current: None,
                combinations: Arc::clone(&combinations),
                emitted: total,
            }),
            if total == 0 {
                "No digits were given, so there are no combinations.".to_string()
            } else {
                format!("All {total} combinations have been produced.")
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::execution::step::{StepTrace, TraceOutcome};

    fn product(trace: &StepTrace, index: usize) -> &ProductSnapshot {
        match &trace.steps()[index].snapshot {
            Snapshot::Product(p) => p,
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_two_three() {
        let trace = LetterCombinations {
            digits: "23".to_string(),
        }
        .generate(&GeneratorLimits::default());

        assert_eq!(trace.len(), 10);
        let done = product(&trace, trace.last_index());
        assert_eq!(
            done.combinations.to_vec(),
            vec!["ad", "ae", "af", "bd", "be", "bf", "cd", "ce", "cf"]
        );
        assert_eq!(product(&trace, 4).current.as_deref(), Some("be"));
        assert_eq!(product(&trace, 4).choice, vec![1, 1]);
        assert_eq!(product(&trace, 4).emitted, 5);
    }

    #[test]
    fn test_empty_digits() {
        let trace = LetterCombinations { digits: String::new() }.generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert_eq!(product(&trace, 0).emitted, 0);
    }

    #[test]
    fn test_rejects_non_letter_digits() {
        let trace = LetterCombinations {
            digits: "21".to_string(),
        }
        .generate(&GeneratorLimits::default());
        assert!(matches!(trace.outcome(), TraceOutcome::InvalidInput { .. }));
    }

    #[test]
    fn test_too_many_combinations() {
        // 4^8 = 65536 combinations
        let trace = LetterCombinations {
            digits: "79797979".to_string(),
        }
        .generate(&GeneratorLimits::default());

        assert_eq!(trace.len(), 1);
        assert_eq!(
            trace.outcome(),
            &TraceOutcome::NotSimulatable {
                limit: GeneratorLimits::DEFAULT_MAX_STEPS,
                required: 65_537,
            }
        );
    }

    #[test]
    fn test_huge_product_does_not_overflow() {
        let digits = "9".repeat(200);
        let trace = LetterCombinations { digits }.generate(&GeneratorLimits::default());
        assert_eq!(trace.terminal().kind, StepKind::Overflow);
    }
}
