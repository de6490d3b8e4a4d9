//! An insertion-ordered bijection between values and dense ids.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::{GridrexError, Result};

/// Maps values to dense ids in `[0, len)` in insertion order.
///
/// The value type doubles as the interning key, so callers hand in canonical
/// forms (e.g. the fixed-width word vector of an [super::IntSet] or a pattern
/// key string).
#[derive(Debug, Clone, Default)]
pub(crate) struct IdMap<T> {
    ids: FxHashMap<T, usize>,
    values: Vec<T>,
}

impl<T> IdMap<T>
where
    T: Eq + Hash + Clone + std::fmt::Debug,
{
    pub(crate) fn new() -> Self {
        Self {
            ids: FxHashMap::default(),
            values: Vec::new(),
        }
    }

    /// Get the id of the value, inserting it with the next free id if absent.
    pub(crate) fn get_or_insert(&mut self, value: T) -> usize {
        if let Some(&id) = self.ids.get(&value) {
            return id;
        }
        let id = self.values.len();
        self.ids.insert(value.clone(), id);
        self.values.push(value);
        id
    }

    /// Get the id of the value, failing if it has never been interned.
    pub(crate) fn get(&self, value: &T) -> Result<usize> {
        self.ids
            .get(value)
            .copied()
            .ok_or_else(|| GridrexError::unknown_key(format!("{:?}", value)))
    }

    /// Get the value interned under the given id.
    pub(crate) fn value(&self, id: usize) -> &T {
        &self.values[id]
    }

    /// The number of interned values.
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the values in insertion order.
    #[allow(dead_code)]
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
}
