//! Ordered note collection produced by one ingestion.
//!
//! # Invariants
//! - Notes are stored in newest-first order as produced by
//!   `crate::pipeline::order`.
//! - Every ingestion creates a collection with a fresh `CollectionId`.

use crate::model::note::{Note, NoteId};
use crate::pipeline::group::{group_by_month, MonthGroups};
use crate::search::title::TitleFilter;
use std::path::PathBuf;
use uuid::Uuid;

/// Identity of one ingested collection, fresh per ingestion.
pub type CollectionId = Uuid;

/// Where the payload text of a collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOrigin {
    /// No collection loaded yet.
    Empty,
    /// Text handed over directly by the caller.
    Inline,
    File(PathBuf),
    Url(String),
}

/// Immutable, ordered set of notes from one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteCollection {
    id: CollectionId,
    origin: NoteOrigin,
    notes: Vec<Note>,
}

impl NoteCollection {
    /// Wraps notes that are already in newest-first order.
    pub(crate) fn from_ordered(origin: NoteOrigin, notes: Vec<Note>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            notes,
        }
    }

    /// Collection held before anything has been loaded.
    pub fn empty() -> Self {
        Self::from_ordered(NoteOrigin::Empty, Vec::new())
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn origin(&self) -> &NoteOrigin {
        &self.origin
    }

    /// Notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// First note carrying `id`.
    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    /// Number of notes whose timestamp did not parse.
    pub fn invalid_timestamp_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|note| !note.normalized().is_valid())
            .count()
    }

    /// Title-filtered view in collection order.
    pub fn filter(&self, query: &str) -> Vec<&Note> {
        TitleFilter::new(query).apply(&self.notes)
    }

    /// Month buckets of the title-filtered view.
    pub fn grouped(&self, query: &str) -> MonthGroups<&Note> {
        group_by_month(self.filter(query))
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}
