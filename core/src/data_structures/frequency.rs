//! Ordered frequency map shared by the window generators
//!
//! Backed by a `BTreeMap` so that snapshots taken from it iterate in a fixed
//! order and serialize identically across runs.

use std::collections::BTreeMap;

/// Multiset of keys with per-key counts; zero counts are never stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap<K: Ord + Copy> {
    counts: BTreeMap<K, usize>,
    total: usize,
}

impl<K: Ord + Copy> FrequencyMap<K> {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Adds one occurrence and returns the new count
    pub fn increment(&mut self, key: K) -> usize {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        self.total += 1;
        *count
    }

    /// Removes one occurrence and returns the remaining count
    pub fn decrement(&mut self, key: K) -> usize {
        match self.counts.get_mut(&key) {
            Some(count) if *count > 1 => {
                *count -= 1;
                self.total -= 1;
                *count
            }
            Some(_) => {
                self.counts.remove(&key);
                self.total -= 1;
                0
            }
            None => 0,
        }
    }

    pub fn count(&self, key: K) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of occurrences across all keys
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// True when some key occurs more than once
    pub fn has_duplicate(&self) -> bool {
        self.total > self.counts.len()
    }

    /// Copy of the counts for a snapshot
    pub fn to_map(&self) -> BTreeMap<K, usize> {
        self.counts.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

impl<K: Ord + Copy> FromIterator<K> for FrequencyMap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut map = Self::new();
        for key in iter {
            map.increment(key);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_decrement() {
        let mut map = FrequencyMap::new();
        assert_eq!(map.increment('a'), 1);
        assert_eq!(map.increment('a'), 2);
        assert_eq!(map.increment('b'), 1);
        assert_eq!(map.total(), 3);
        assert!(map.has_duplicate());

        assert_eq!(map.decrement('a'), 1);
        assert!(!map.has_duplicate());
        assert_eq!(map.decrement('a'), 0);
        assert_eq!(map.count('a'), 0);
        assert_eq!(map.distinct(), 1);
        assert_eq!(map.decrement('z'), 0);
        assert_eq!(map.total(), 1);
    }

    #[test]
    fn test_from_iter_orders_keys() {
        let map: FrequencyMap<char> = "cabac".chars().collect();
        let keys: Vec<_> = map.iter().collect();
        assert_eq!(keys, vec![('a', 2), ('b', 1), ('c', 2)]);
    }
}
