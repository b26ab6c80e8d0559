//! Month buckets over an ordered note sequence.
//!
//! # Responsibility
//! - Partition notes by `month_year_key` in first-occurrence key order.
//!
//! # Invariants
//! - Lossless: flattening the buckets reproduces the input exactly.
//! - No secondary sort of keys; chronological bucket order relies on the
//!   input having been ordered by `crate::pipeline::order` first.

use crate::model::note::Note;
use std::borrow::Borrow;
use std::collections::HashMap;

/// One month bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<N> {
    /// Group key, e.g. `January 2024`.
    pub key: String,
    /// Notes in input order.
    pub notes: Vec<N>,
}

/// Ordered mapping from month key to notes.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroups<N> {
    groups: Vec<MonthGroup<N>>,
}

impl<N> MonthGroups<N> {
    pub fn iter(&self) -> std::slice::Iter<'_, MonthGroup<N>> {
        self.groups.iter()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[N]> {
        self.groups
            .iter()
            .find(|group| group.key == key)
            .map(|group| group.notes.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.key.as_str())
    }

    /// Concatenates all buckets in bucket order.
    pub fn into_notes(self) -> Vec<N> {
        self.groups
            .into_iter()
            .flat_map(|group| group.notes)
            .collect()
    }
}

impl<N> IntoIterator for MonthGroups<N> {
    type Item = MonthGroup<N>;
    type IntoIter = std::vec::IntoIter<MonthGroup<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a MonthGroups<N> {
    type Item = &'a MonthGroup<N>;
    type IntoIter = std::slice::Iter<'a, MonthGroup<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Groups notes by their month key, keeping first-occurrence key order.
pub fn group_by_month<N, I>(notes: I) -> MonthGroups<N>
where
    N: Borrow<Note>,
    I: IntoIterator<Item = N>,
{
    let mut groups: Vec<MonthGroup<N>> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for note in notes {
        let key = note.borrow().month_year_key();
        let slot = match index_by_key.get(key) {
            Some(slot) => *slot,
            None => {
                index_by_key.insert(key.to_string(), groups.len());
                groups.push(MonthGroup {
                    key: key.to_string(),
                    notes: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].notes.push(note);
    }

    MonthGroups { groups }
}
