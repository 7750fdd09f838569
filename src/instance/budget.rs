//! Candidate allocations.

use super::types::Instance;

/// A subset of an instance's items.
///
/// Stored as a membership mask over item positions, so membership tests are
/// O(1) and iteration follows the instance's item order. Serializes as the
/// bare mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<bool>", into = "Vec<bool>")
)]
pub struct Budget {
    mask: Vec<bool>,
    len: usize,
}

impl Budget {
    /// The empty budget over `item_count` items.
    pub fn empty(item_count: usize) -> Self {
        Self {
            mask: vec![false; item_count],
            len: 0,
        }
    }

    /// The empty budget sized for `instance`.
    pub fn empty_for(instance: &Instance) -> Self {
        Self::empty(instance.item_count())
    }

    /// Builds a budget from item positions. Repeated positions collapse.
    ///
    /// # Panics
    /// Panics if a position is not below `item_count`.
    pub fn from_indices<I: IntoIterator<Item = usize>>(item_count: usize, indices: I) -> Self {
        let mut budget = Self::empty(item_count);
        for i in indices {
            budget.insert(i);
        }
        budget
    }

    /// Builds a budget from item ids, or `None` if an id is unknown.
    pub fn from_ids<'a, I: IntoIterator<Item = &'a str>>(
        instance: &Instance,
        ids: I,
    ) -> Option<Self> {
        let mut budget = Self::empty_for(instance);
        for id in ids {
            budget.insert(instance.index_of(id)?);
        }
        Some(budget)
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no item is selected.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the item at `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Selected positions in item order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &selected)| selected.then_some(i))
    }

    /// Selected item ids in item order.
    pub fn ids<'a>(&'a self, instance: &'a Instance) -> impl Iterator<Item = &'a str> + 'a {
        self.indices().map(move |i| instance.item_id(i))
    }

    /// A copy of this budget with `index` added.
    pub fn with(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.insert(index);
        next
    }

    pub(crate) fn insert(&mut self, index: usize) {
        if !self.mask[index] {
            self.mask[index] = true;
            self.len += 1;
        }
    }

    pub(crate) fn remove(&mut self, index: usize) {
        if self.mask[index] {
            self.mask[index] = false;
            self.len -= 1;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.mask.iter_mut().for_each(|m| *m = false);
        self.len = 0;
    }
}

impl From<Vec<bool>> for Budget {
    fn from(mask: Vec<bool>) -> Self {
        let len = mask.iter().filter(|&&m| m).count();
        Self { mask, len }
    }
}

impl From<Budget> for Vec<bool> {
    fn from(budget: Budget) -> Self {
        budget.mask
    }
}
