//! A mutable set of integers with O(1) add, remove and uniform sampling.

use rand::Rng;
use rustc_hash::FxHashMap;

/// A set of `usize` values backed by an unordered array plus a position index.
///
/// Invariant: `items[positions[x]] == x` for every member x. Removal swaps the
/// removed slot with the last element, so the backing array stays dense. The
/// underlying allocations never shrink.
#[derive(Debug, Clone, Default)]
pub(crate) struct SampleableSet {
    items: Vec<usize>,
    positions: FxHashMap<usize, usize>,
}

impl SampleableSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Returns true if it was not already present.
    pub(crate) fn insert(&mut self, value: usize) -> bool {
        if self.positions.contains_key(&value) {
            return false;
        }
        self.positions.insert(value, self.items.len());
        self.items.push(value);
        true
    }

    /// Remove a value. Returns true if it was present.
    pub(crate) fn remove(&mut self, value: usize) -> bool {
        let Some(position) = self.positions.remove(&value) else {
            return false;
        };
        let last = self.items.pop().expect("position index out of sync");
        if last != value {
            self.items[position] = last;
            self.positions.insert(last, position);
        }
        true
    }

    /// Check if the set contains the given value.
    #[allow(dead_code)]
    pub(crate) fn contains(&self, value: usize) -> bool {
        self.positions.contains_key(&value)
    }

    /// The number of values in the set.
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Pick a uniformly random member, or None if the set is empty.
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items[rng.gen_range(0..self.items.len())])
    }

    /// Iterate over the members in unspecified order.
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.items.iter()
    }
}
