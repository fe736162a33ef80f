//! Binary search over the half-open range `[lo, hi)`
//!
//! One `probe` step per midpoint inspected; `mid = lo + (hi - lo) / 2`.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::execution::step::{SearchSnapshot, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinarySearch {
    pub values: Vec<i64>,
    pub target: i64,
}

impl StepGenerator for BinarySearch {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::BinarySearch
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        if self.values.windows(2).any(|w| w[0] > w[1]) {
            return Err(GeneratorError::invalid("values must be sorted in ascending order"));
        }

        let values: Arc<[i64]> = self.values.as_slice().into();
        let target = self.target;
        let snapshot = |lo, hi, mid, found| {
            Snapshot::Search(SearchSnapshot {
                values: Arc::clone(&values),
                target,
                lo,
                hi,
                mid,
                found,
            })
        };

        let (mut lo, mut hi) = (0, values.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let probe = values[mid];
            match probe.cmp(&target) {
                Ordering::Equal => {
                    recorder.record(
                        StepKind::Probe,
                        snapshot(lo, hi, Some(mid), Some(mid)),
                        format!("values[{mid}] = {probe} equals the target. Found at index {mid}."),
                    )?;
                    recorder.mark_last_best();
                    return Ok(());
                }
                Ordering::Less => {
                    recorder.record(
                        StepKind::Probe,
                        snapshot(lo, hi, Some(mid), None),
                        format!("values[{mid}] = {probe} is less than {target}; search the right half."),
                    )?;
                    lo = mid + 1;
                }
                Ordering::Greater => {
                    recorder.record(
                        StepKind::Probe,
                        snapshot(lo, hi, Some(mid), None),
                        format!("values[{mid}] = {probe} is greater than {target}; search the left half."),
                    )?;
                    hi = mid;
                }
            }
        }

        recorder.record(
            StepKind::Done,
            snapshot(lo, hi, None, None),
            format!("The range is empty; {target} is not present. It would be inserted at index {lo}."),
        )?;
        Ok(())
    }
}
