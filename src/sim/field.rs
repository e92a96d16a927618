//! Bubble field store
//!
//! A dense, insertion-ordered array of bubbles. Indices double as node ids
//! for cluster search, and are only valid until the next removal: removing
//! index `i` shifts every later bubble down by one.
//!
//! Batch removal must therefore go from the highest index to the lowest.
//! [`BubbleField::remove_indices`] enforces that order on its input.

use glam::Vec2;

use super::state::{Bubble, BubbleType};

/// Dense collection of the bubbles in play
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bubble; returns its index (valid until the next removal)
    pub fn add(&mut self, pos: Vec2, kind: BubbleType) -> usize {
        self.bubbles.push(Bubble::new(pos, kind));
        self.bubbles.len() - 1
    }

    /// Remove one bubble, shifting later indices down by one
    pub fn remove_at(&mut self, index: usize) -> Option<Bubble> {
        if index < self.bubbles.len() {
            Some(self.bubbles.remove(index))
        } else {
            None
        }
    }

    /// Remove a batch of bubbles.
    ///
    /// `descending` must be sorted from highest to lowest index, without
    /// duplicates; removing in that order keeps the not-yet-processed indices
    /// valid. Out-of-order or out-of-range entries are skipped. Removed
    /// bubbles are returned in removal order.
    pub fn remove_indices(&mut self, descending: &[usize]) -> Vec<Bubble> {
        debug_assert!(
            descending.windows(2).all(|w| w[0] > w[1]),
            "remove_indices expects strictly descending indices"
        );

        let mut removed = Vec::with_capacity(descending.len());
        let mut last = usize::MAX;
        for &index in descending {
            if index >= last {
                continue;
            }
            if let Some(bubble) = self.remove_at(index) {
                removed.push(bubble);
            }
            last = index;
        }
        removed
    }

    /// Number of bubbles in play
    #[inline]
    pub fn count(&self) -> usize {
        self.bubbles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Bubble> {
        self.bubbles.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Bubble> {
        self.bubbles.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    pub fn as_slice(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }
}

/// Sort indices into the order [`BubbleField::remove_indices`] expects
pub fn descending(mut indices: Vec<usize>) -> Vec<usize> {
    indices.sort_unstable_by(|a, b| b.cmp(a));
    indices.dedup();
    indices
}
