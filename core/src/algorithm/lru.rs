//! LRU cache replay
//!
//! Replays a sequence of `get`/`put` operations against a fixed-capacity
//! recency list, one step per operation. The snapshot lists the cache from
//! least to most recently used so the eviction victim is always the head.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::data_structures::recency::{PutResult, RecencyList};
use crate::execution::step::{CacheOp, CacheOutcome, CacheSnapshot, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

/// LRU Cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LruCache {
    pub capacity: i64,
    pub ops: Vec<CacheOp>,
}

impl StepGenerator for LruCache {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::LruCache
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let capacity = match usize::try_from(self.capacity) {
            Ok(c) if c > 0 => c,
            _ => {
                return Err(GeneratorError::invalid(format!(
                    "capacity must be positive, got {}",
                    self.capacity
                )))
            }
        };
        let mut cache = RecencyList::new(capacity);

        for op in &self.ops {
            let (kind, outcome, evicted, narration) = match *op {
                CacheOp::Get { key } => match cache.get(key) {
                    Some(value) => (
                        StepKind::Read,
                        CacheOutcome::Hit { value },
                        None,
                        format!("get({key}) finds {value} and marks key {key} most recently used."),
                    ),
                    None => (
                        StepKind::Read,
                        CacheOutcome::Miss,
                        None,
                        format!("get({key}) misses: key {key} is not cached, so it returns -1."),
                    ),
                },
                CacheOp::Put { key, value } => match cache.put(key, value) {
                    PutResult::Inserted => (
                        StepKind::Write,
                        CacheOutcome::Inserted,
                        None,
                        format!("put({key}, {value}) inserts a new entry at the most recent end."),
                    ),
                    PutResult::Updated { previous } => (
                        StepKind::Write,
                        CacheOutcome::Updated { previous },
                        None,
                        format!("put({key}, {value}) replaces {previous} and marks key {key} most recently used."),
                    ),
                    PutResult::Evicted { evicted } => (
                        StepKind::Evict,
                        CacheOutcome::Inserted,
                        Some(evicted),
                        format!(
                            "The cache is full, so put({key}, {value}) evicts the least recently used key {} before inserting.",
                            evicted.key
                        ),
                    ),
                },
            };

            recorder.record(
                kind,
                Snapshot::Cache(CacheSnapshot {
                    capacity,
                    entries: cache.entries(),
                    op: Some(*op),
                    outcome: Some(outcome),
                    evicted,
                }),
                narration,
            )?;
        }

        recorder.record(
            StepKind::Done,
            Snapshot::Cache(CacheSnapshot {
                capacity,
                entries: cache.entries(),
                op: None,
                outcome: None,
                evicted: None,
            }),
            format!(
                "All {} operations replayed; {} of {} slots in use.",
                self.ops.len(),
                cache.len(),
                capacity
            ),
        )?;
        Ok(())
    }
}
