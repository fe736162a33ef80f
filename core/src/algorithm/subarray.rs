//! Kadane's maximum subarray scan
//!
//! The running subarray restarts at the current element exactly when the
//! running sum before it is negative. The best sum only moves on a strictly
//! greater value, so ties keep the earliest subarray.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::execution::step::{Snapshot, StepKind, SubarraySnapshot};
use crate::execution::tracer::TraceRecorder;

/// Maximum Subarray
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxSubarray {
    pub values: Vec<i64>,
}

impl StepGenerator for MaxSubarray {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::MaxSubarray
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let values: Arc<[i64]> = self.values.as_slice().into();
        let Some(&first) = values.first() else {
            return Err(GeneratorError::invalid("a maximum subarray needs at least one element"));
        };

        let mut running = first;
        let mut run_start = 0;
        let mut best_sum = first;
        let mut best_range = (0, 0);

        for (position, &value) in values.iter().enumerate() {
            let restart = position == 0 || running < 0;
            if position > 0 {
                if restart {
                    running = value;
                    run_start = position;
                } else {
                    running = running.saturating_add(value);
                }
            }

            let improved = position == 0 || running > best_sum;
            if improved {
                best_sum = running;
                best_range = (run_start, position);
            }

            let mut narration = if position == 0 {
                format!("Start the first run at {value}.")
            } else if restart {
                format!("The running sum was negative, so start a new run at {value}.")
            } else {
                format!("Extend the run with {value}; running sum is {running}.")
            };
            if improved {
                narration.push_str(&format!(" New best sum {best_sum}."));
            }

            recorder.record(
                if restart { StepKind::Restart } else { StepKind::Extend },
                Snapshot::Subarray(SubarraySnapshot {
                    values: Arc::clone(&values),
                    position,
                    run_start,
                    running_sum: running,
                    best_sum,
                    best_range,
                }),
                narration,
            )?;
            if improved {
                recorder.mark_last_best();
            }
        }

        recorder.record(
            StepKind::Done,
            Snapshot::Subarray(SubarraySnapshot {
                values: Arc::clone(&values),
                position: values.len() - 1,
                run_start,
                running_sum: running,
                best_sum,
                best_range,
            }),
            format!(
                "The maximum subarray spans indices {}..={} with sum {best_sum}.",
                best_range.0, best_range.1
            ),
        )?;
        Ok(())
    }
}
