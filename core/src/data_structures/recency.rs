//! Fixed-capacity recency list used by the LRU generator
//!
//! Entries are kept from least recently used (head) to most recently used
//! (tail). Capacities in the walkthroughs are small, so a `VecDeque` with
//! linear lookup keeps the order explicit and trivially snapshot-able.

use std::collections::VecDeque;

use crate::execution::step::CacheEntry;

/// Result of inserting through the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutResult {
    Inserted,
    Updated { previous: i64 },
    Evicted { evicted: CacheEntry },
}

#[derive(Debug, Clone)]
pub struct RecencyList {
    capacity: usize,
    entries: VecDeque<CacheEntry>,
}

impl RecencyList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: i64) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Moves the entry at `pos` to the tail and returns it
    fn touch(&mut self, pos: usize) -> Option<CacheEntry> {
        let entry = self.entries.remove(pos)?;
        self.entries.push_back(entry);
        Some(entry)
    }

    /// Looks up a key, refreshing its recency on a hit
    pub fn get(&mut self, key: i64) -> Option<i64> {
        let pos = self.position(key)?;
        self.touch(pos).map(|e| e.value)
    }

    /// Inserts or updates a key; a new key at capacity evicts the head first
    pub fn put(&mut self, key: i64, value: i64) -> PutResult {
        if let Some(pos) = self.position(key) {
            let previous = self.entries[pos].value;
            self.entries[pos].value = value;
            self.touch(pos);
            return PutResult::Updated { previous };
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(CacheEntry { key, value });

        match evicted {
            Some(evicted) => PutResult::Evicted { evicted },
            None => PutResult::Inserted,
        }
    }

    /// Entries ordered head (least recent) to tail (most recent)
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.entries.iter().copied().collect()
    }
}
