//! Floyd cycle detection
//!
//! Both pointers start at the head. Every tick first checks whether `fast` or
//! `fast.next` is null, which proves there is no cycle; otherwise `slow`
//! moves one node and `fast` two. Landing on the same node proves a cycle.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::data_structures::linked_list::ArenaList;
use crate::execution::step::{CycleSnapshot, CycleVerdict, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

/// Linked List Cycle
///
/// `cycle_position` is the index the tail links back to, or `-1` for none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDetection {
    pub values: Vec<i64>,
    pub cycle_position: i64,
}

impl StepGenerator for CycleDetection {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::CycleDetection
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let entry = match self.cycle_position {
            -1 => None,
            p => Some(usize::try_from(p).map_err(|_| {
                GeneratorError::invalid(format!("cycle position must be -1 or a node index, got {p}"))
            })?),
        };
        let list = ArenaList::new(&self.values, entry).ok_or_else(|| {
            GeneratorError::invalid(format!(
                "cycle position {} is outside a list of {} nodes",
                self.cycle_position,
                self.values.len()
            ))
        })?;

        let snapshot = |tick, slow, fast, verdict| {
            Snapshot::Cycle(CycleSnapshot {
                values: list.values(),
                cycle_entry: list.cycle_entry(),
                tick,
                slow,
                fast,
                verdict,
            })
        };

        let mut slow = list.head();
        let mut fast = list.head();
        let mut tick = 0;

        loop {
            let fast_next = list.advance(fast, 1);
            if fast.is_none() || fast_next.is_none() {
                recorder.record(
                    StepKind::Exhausted,
                    snapshot(tick, slow, fast, Some(CycleVerdict::NoCycle)),
                    if list.is_empty() {
                        "The list is empty, so it has no cycle.".to_string()
                    } else if fast.is_none() {
                        "The fast pointer fell off the end of the list: no cycle.".to_string()
                    } else {
                        "The fast pointer has no next node: no cycle.".to_string()
                    },
                )?;
                return Ok(());
            }

            slow = list.advance(slow, 1);
            fast = list.advance(fast_next, 1);
            tick += 1;

            if slow.is_some() && slow == fast {
                let meeting_node = slow.unwrap_or_default();
                recorder.record(
                    StepKind::Meet,
                    snapshot(tick, slow, fast, Some(CycleVerdict::CycleFound { meeting_node })),
                    format!("Slow and fast both reach node {meeting_node}: the list has a cycle."),
                )?;
                recorder.mark_last_best();
                return Ok(());
            }

            let describe = |node: Option<usize>| node.map_or_else(|| "null".to_string(), |n| format!("node {n}"));
            recorder.record(
                StepKind::Advance,
                snapshot(tick, slow, fast, None),
                format!(
                    "Slow moves one step to {}; fast moves two steps to {}.",
                    describe(slow),
                    describe(fast)
                ),
            )?;
        }
    }
}
