//! Ordered set of 0-based line indices.
//!
//! Seeds, highlights and display sets are all `LineSet`s. Membership is the
//! only thing that carries meaning; iteration is always ascending, which is
//! the order every consumer wants anyway.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: BTreeSet<usize>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line; returns `true` if it was not present yet.
    pub fn insert(&mut self, line: usize) -> bool {
        self.lines.insert(line)
    }

    /// Insert every line of an inclusive range.
    pub fn insert_range(&mut self, range: RangeInclusive<usize>) {
        self.lines.extend(range);
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Largest line in the set.
    pub fn last(&self) -> Option<usize> {
        self.lines.last().copied()
    }

    /// Ascending iteration.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().copied()
    }

    /// Sorted copy, used as an iteration snapshot while the set grows.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl FromIterator<usize> for LineSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for LineSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter().copied()
    }
}

impl<const N: usize> From<[usize; N]> for LineSet {
    fn from(lines: [usize; N]) -> Self {
        lines.into_iter().collect()
    }
}
