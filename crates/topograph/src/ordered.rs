//! Insertion-ordered set of CI ids.

use indexmap::IndexSet;

use crate::model::CiId;

/// A set of [`CiId`]s that iterates in first-insertion order.
///
/// Layout determinism depends on first-seen order, so every place that
/// collects ids goes through this type rather than a hash set.
#[derive(Debug, Clone, Default)]
pub struct OrderedIdSet {
    ids: IndexSet<CiId>,
}

impl OrderedIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` at the end unless it is already present.
    ///
    /// Returns `true` if the id was newly inserted.
    pub fn insert(&mut self, id: CiId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: CiId) -> bool {
        self.ids.contains(&id)
    }

    /// Position of `id` in insertion order.
    pub fn index_of(&self, id: CiId) -> Option<usize> {
        self.ids.get_index_of(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CiId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<CiId> for OrderedIdSet {
    fn from_iter<I: IntoIterator<Item = CiId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
