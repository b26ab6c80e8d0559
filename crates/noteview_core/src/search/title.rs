//! Title substring search.
//!
//! # Responsibility
//! - Filter notes whose title contains a query, ignoring case.
//!
//! # Invariants
//! - An empty query is the identity transform.
//! - Matching never reorders notes.

use crate::model::note::Note;
use std::borrow::Borrow;

/// Prepared case-insensitive title matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter {
    /// Lowercased query; `None` matches everything.
    needle: Option<String>,
}

impl TitleFilter {
    /// Prepares a filter. The query is used as typed, without trimming.
    pub fn new(query: &str) -> Self {
        let needle = if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        Self { needle }
    }

    /// Returns whether this filter lets every note through.
    pub fn is_identity(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, note: &Note) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => note.title().to_lowercase().contains(needle.as_str()),
        }
    }

    /// Keeps the notes this filter matches, in input order.
    pub fn apply<N, I>(&self, notes: I) -> Vec<N>
    where
        N: Borrow<Note>,
        I: IntoIterator<Item = N>,
    {
        notes
            .into_iter()
            .filter(|note| self.matches(note.borrow()))
            .collect()
    }
}

/// Returns the notes whose title contains `query`, case-insensitively.
pub fn filter_by_title<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    TitleFilter::new(query).apply(notes)
}
