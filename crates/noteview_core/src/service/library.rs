//! Note library controller.
//!
//! # Responsibility
//! - Hold the current [`NoteCollection`] and replace it on successful loads.
//! - Track the selected note and an in-flight loading flag.
//!
//! # Invariants
//! - A collection is replaced as a whole under one write lock; readers see
//!   either the old or the new collection, never a mix.
//! - A failed load leaves the held collection and selection untouched.
//! - When loads race, the last one to complete wins.
//! - The selection survives a swap only if the new collection has a note
//!   with an equal id.

use crate::model::collection::{NoteCollection, NoteOrigin};
use crate::model::note::{Note, NoteId};
use crate::service::ingest::{ingest_from, IngestResult};
use crate::source::file::read_note_file;
use crate::source::NoteFetcher;
use log::{debug, info};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Owner of the loaded collection and its view state.
pub struct NoteLibrary {
    current: RwLock<Arc<NoteCollection>>,
    selected: Mutex<Option<NoteId>>,
    in_flight: AtomicUsize,
}

impl Default for NoteLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteLibrary {
    /// Creates a library holding an empty collection.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(NoteCollection::empty())),
            selected: Mutex::new(None),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns the currently held collection.
    ///
    /// Filtered and grouped views borrow from the snapshot via
    /// [`NoteCollection::filter`] and [`NoteCollection::grouped`].
    pub fn snapshot(&self) -> Arc<NoteCollection> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns whether any load is in progress.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Ingests caller-supplied text and swaps it in on success.
    pub fn load_text(&self, raw_text: &str) -> IngestResult<Arc<NoteCollection>> {
        let _loading = LoadingGuard::enter(&self.in_flight);
        let collection = ingest_from(NoteOrigin::Inline, raw_text)?;
        Ok(self.replace(collection))
    }

    /// Reads a payload file, ingests it and swaps it in on success.
    pub fn load_file(&self, path: &Path) -> IngestResult<Arc<NoteCollection>> {
        let _loading = LoadingGuard::enter(&self.in_flight);
        let text = read_note_file(path)?;
        let collection = ingest_from(NoteOrigin::File(path.to_path_buf()), &text)?;
        Ok(self.replace(collection))
    }

    /// Fetches a payload URL, ingests it and swaps it in on success.
    pub fn load_url<F: NoteFetcher>(
        &self,
        fetcher: &F,
        url: &str,
    ) -> IngestResult<Arc<NoteCollection>> {
        let _loading = LoadingGuard::enter(&self.in_flight);
        let text = fetcher.fetch(url)?;
        let collection = ingest_from(NoteOrigin::Url(url.to_string()), &text)?;
        Ok(self.replace(collection))
    }

    /// Marks the note with `id` as selected.
    ///
    /// Returns `false` (and keeps the previous selection) when the current
    /// collection has no such note.
    pub fn select(&self, id: &NoteId) -> bool {
        // Lock order: `current` then `selected`, same as `replace`.
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        if current.find(id).is_none() {
            return false;
        }
        *self.selection() = Some(id.clone());
        true
    }

    pub fn clear_selection(&self) {
        *self.selection() = None;
    }

    /// Returns the selected note from the current collection, if any.
    pub fn selected_note(&self) -> Option<Note> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        let selected = self.selection().clone()?;
        current.find(&selected).cloned()
    }

    fn replace(&self, collection: NoteCollection) -> Arc<NoteCollection> {
        let next = Arc::new(collection);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, Arc::clone(&next));

        // Selection is reconciled while `current` is still write-locked.
        let mut selected = self.selection();
        let stale = selected
            .as_ref()
            .is_some_and(|id| next.find(id).is_none());
        if stale {
            debug!("event=selection_cleared module=library reason=missing_after_swap");
            *selected = None;
        }
        drop(selected);
        drop(current);

        info!(
            "event=collection_swap module=library status=ok previous={} current={} notes={}",
            previous.id(),
            next.id(),
            next.len()
        );
        next
    }

    fn selection(&self) -> MutexGuard<'_, Option<NoteId>> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the in-flight counter raised for the lifetime of one load.
struct LoadingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::NoteLibrary;
    use crate::model::note::NoteId;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, PoisonError};
    use std::thread;

    fn payload(ids: &[&str]) -> String {
        let notes: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "title": id,
                    "timestamp": { "date": "01/01/2024", "time": "00:00:00" }
                })
            })
            .collect();
        serde_json::Value::Array(notes).to_string()
    }

    /// Selection must always name a note of the held collection.
    fn assert_selection_consistent(library: &NoteLibrary) {
        let current = library
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = library.selection().as_ref() {
            assert!(
                current.find(id).is_some(),
                "selection `{id}` outlived collection {}",
                current.id()
            );
        }
    }

    #[test]
    fn selection_never_outlives_its_collection_under_racing_swaps() {
        let library = Arc::new(NoteLibrary::new());
        let with_x = payload(&["x", "y"]);
        let without_x = payload(&["y"]);
        library.load_text(&with_x).unwrap();
        let done = Arc::new(AtomicBool::new(false));

        let loaders: Vec<_> = [with_x, without_x]
            .into_iter()
            .map(|text| {
                let library = Arc::clone(&library);
                thread::spawn(move || {
                    for _ in 0..300 {
                        library.load_text(&text).unwrap();
                    }
                })
            })
            .collect();

        let selector = {
            let library = Arc::clone(&library);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let x = NoteId::from("x");
                while !done.load(Ordering::SeqCst) {
                    library.select(&x);
                    assert_selection_consistent(&library);
                }
            })
        };

        for loader in loaders {
            loader.join().unwrap();
        }
        done.store(true, Ordering::SeqCst);
        selector.join().unwrap();
        assert_selection_consistent(&library);
    }

    #[test]
    fn swap_keeps_selection_that_the_final_collection_contains() {
        let library = NoteLibrary::new();
        library.load_text(&payload(&["x"])).unwrap();
        assert!(library.select(&NoteId::from("x")));

        library.load_text(&payload(&["x", "z"])).unwrap();
        library.load_text(&payload(&["x"])).unwrap();
        assert_eq!(
            library.selected_note().map(|note| note.id().clone()),
            Some(NoteId::from("x"))
        );
        assert_selection_consistent(&library);
    }

    #[test]
    fn library_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoteLibrary>();
    }

    #[test]
    fn loading_flag_drops_after_failed_load() {
        let library = NoteLibrary::new();
        assert!(library.load_text("nope").is_err());
        assert!(!library.is_loading());
    }
}
