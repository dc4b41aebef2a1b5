//! Value-typed atom selections.
//!
//! An [`AtomSet`] is a plain, ordered collection of atom indices. Selections are computed
//! views over a [`System`](super::system::System) and a frame, so there is nothing to
//! release once a query goes out of scope.

use super::types::AtomIndex;
use std::collections::BTreeSet;

/// Ordered, duplicate-free set of atom indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomSet {
    indices: BTreeSet<AtomIndex>,
}

impl AtomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: AtomIndex) -> bool {
        self.indices.insert(index)
    }

    pub fn contains(&self, index: AtomIndex) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = AtomIndex> + '_ {
        self.indices.iter().copied()
    }

    pub fn union(&self, other: &AtomSet) -> AtomSet {
        self.indices.union(&other.indices).copied().collect()
    }

    pub fn intersection(&self, other: &AtomSet) -> AtomSet {
        self.indices.intersection(&other.indices).copied().collect()
    }

    pub fn difference(&self, other: &AtomSet) -> AtomSet {
        self.indices.difference(&other.indices).copied().collect()
    }

    /// Returns `true` when both selections share at least one atom.
    pub fn overlaps(&self, other: &AtomSet) -> bool {
        !self.indices.is_disjoint(&other.indices)
    }
}

impl FromIterator<AtomIndex> for AtomSet {
    fn from_iter<T: IntoIterator<Item = AtomIndex>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl Extend<AtomIndex> for AtomSet {
    fn extend<T: IntoIterator<Item = AtomIndex>>(&mut self, iter: T) {
        self.indices.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AtomSet {
    type Item = AtomIndex;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, AtomIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}
