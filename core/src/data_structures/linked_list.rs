//! Arena-backed singly linked list
//!
//! Nodes are addressed by their index in the arena, which lets pointer-chasing
//! generators record pointer positions as plain integers. The tail may link
//! back to an earlier node to form a cycle.

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ArenaList {
    values: Arc<[i64]>,
    next: Vec<Option<usize>>,
    cycle_entry: Option<usize>,
}

impl ArenaList {
    /// Builds `values[0] -> values[1] -> ...`, linking the tail to
    /// `cycle_entry` when given. Returns `None` if the entry is out of range.
    pub fn new(values: &[i64], cycle_entry: Option<usize>) -> Option<Self> {
        if let Some(entry) = cycle_entry {
            if entry >= values.len() {
                return None;
            }
        }

        let len = values.len();
        let next = (0..len)
            .map(|i| if i + 1 < len { Some(i + 1) } else { cycle_entry })
            .collect();

        Some(Self {
            values: values.into(),
            next,
            cycle_entry,
        })
    }

    pub fn head(&self) -> Option<usize> {
        if self.values.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn next(&self, node: usize) -> Option<usize> {
        self.next.get(node).copied().flatten()
    }

    /// Follows `hops` links, stopping at the end of the list
    pub fn advance(&self, node: Option<usize>, hops: usize) -> Option<usize> {
        (0..hops).try_fold(node?, |n, _| self.next(n))
    }

    pub fn values(&self) -> Arc<[i64]> {
        Arc::clone(&self.values)
    }

    pub fn cycle_entry(&self) -> Option<usize> {
        self.cycle_entry
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acyclic_list_ends() {
        let list = ArenaList::new(&[1, 2, 3], None).unwrap();
        assert_eq!(list.head(), Some(0));
        assert_eq!(list.advance(Some(0), 2), Some(2));
        assert_eq!(list.advance(Some(0), 3), None);
        assert_eq!(list.advance(None, 1), None);
    }

    #[test]
    fn test_cycle_links_back() {
        let list = ArenaList::new(&[3, 2, 0, -4], Some(1)).unwrap();
        assert_eq!(list.next(3), Some(1));
        assert_eq!(list.advance(Some(0), 5), Some(2));
    }

    #[test]
    fn test_rejects_out_of_range_entry() {
        assert!(ArenaList::new(&[1], Some(1)).is_none());
        assert!(ArenaList::new(&[], None).unwrap().head().is_none());
    }
}
