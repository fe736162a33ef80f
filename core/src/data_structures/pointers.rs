//! Inward-moving pointer pair for two-pointer scans

use crate::execution::step::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPair {
    pub left: usize,
    pub right: usize,
}

impl PointerPair {
    /// Pointers at both ends of a sequence of `len` items, `None` if empty
    pub fn spanning(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|right| Self { left: 0, right })
    }

    /// True while the pointers have not crossed or met
    pub fn is_open(&self) -> bool {
        self.left < self.right
    }

    /// Distance between the pointers
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// Moves one pointer a single position inward
    pub fn advance(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right = self.right.saturating_sub(1),
        }
    }
}
