use noteview_core::{
    IngestError, NoteFetcher, NoteId, NoteLibrary, NoteOrigin, SourceError, SourceResult,
};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn payload(entries: &[(&str, &str, &str)]) -> String {
    let notes: Vec<_> = entries
        .iter()
        .map(|(id, title, date)| {
            json!({
                "id": id,
                "title": title,
                "timestamp": { "date": date, "time": "09:00:00(UTC)" }
            })
        })
        .collect();
    serde_json::Value::Array(notes).to_string()
}

struct StaticFetcher(SourceResult<String>);

impl NoteFetcher for StaticFetcher {
    fn fetch(&self, _url: &str) -> SourceResult<String> {
        self.0.clone()
    }
}

#[test]
fn new_library_is_empty_and_idle() {
    let library = NoteLibrary::new();
    let snapshot = library.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.origin(), &NoteOrigin::Empty);
    assert!(!library.is_loading());
    assert!(library.selected_note().is_none());
}

#[test]
fn successful_load_replaces_collection() {
    let library = NoteLibrary::new();
    library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();
    let loaded = library
        .load_text(&payload(&[("b", "Beta", "02/01/2024"), ("c", "Gamma", "03/01/2024")]))
        .unwrap();

    let snapshot = library.snapshot();
    assert!(Arc::ptr_eq(&loaded, &snapshot));
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.find(&NoteId::from("a")).is_none());
}

#[test]
fn malformed_load_keeps_previous_collection() {
    let library = NoteLibrary::new();
    let before = library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();

    let err = library.load_text("{not valid json").unwrap_err();
    assert!(matches!(err, IngestError::MalformedPayload { .. }));

    let after = library.snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.len(), 1);
}

#[test]
fn invalid_format_load_keeps_previous_collection() {
    let library = NoteLibrary::new();
    let before = library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();

    let err = library.load_text(r#"{"notes": []}"#).unwrap_err();
    assert!(matches!(err, IngestError::InvalidFormat(_)));
    assert!(Arc::ptr_eq(&before, &library.snapshot()));
}

#[test]
fn fetcher_failures_pass_through_unchanged() {
    let library = NoteLibrary::new();
    let failures = [
        SourceError::NotFound,
        SourceError::AccessDenied,
        SourceError::FetchFailed { status: 502 },
        SourceError::EmptyPayload,
        SourceError::CrossOriginBlocked,
    ];

    for failure in failures {
        let fetcher = StaticFetcher(Err(failure.clone()));
        let err = library
            .load_url(&fetcher, "https://example.com/notes.json")
            .unwrap_err();
        assert_eq!(err, IngestError::Source(failure));
    }
    assert!(library.snapshot().is_empty());
    assert!(!library.is_loading());
}

#[test]
fn url_load_records_origin() {
    let library = NoteLibrary::new();
    let fetcher = StaticFetcher(Ok(payload(&[("a", "Alpha", "01/01/2024")])));
    let collection = library
        .load_url(&fetcher, "https://example.com/notes.json")
        .unwrap();
    assert_eq!(
        collection.origin(),
        &NoteOrigin::Url("https://example.com/notes.json".to_string())
    );
}

#[test]
fn fetched_text_that_is_not_json_is_malformed() {
    let library = NoteLibrary::new();
    let fetcher = StaticFetcher(Ok("<html>oops</html>".to_string()));
    let err = library
        .load_url(&fetcher, "https://example.com/notes.json")
        .unwrap_err();
    assert!(matches!(err, IngestError::MalformedPayload { .. }));
}

#[test]
fn file_load_reads_and_orders() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(payload(&[("old", "Old", "01/01/2023"), ("new", "New", "01/01/2024")]).as_bytes())
        .unwrap();

    let library = NoteLibrary::new();
    let collection = library.load_file(file.path()).unwrap();
    assert_eq!(collection.notes()[0].id(), &NoteId::from("new"));
    assert_eq!(
        collection.origin(),
        &NoteOrigin::File(file.path().to_path_buf())
    );
}

#[test]
fn missing_file_is_read_error_and_keeps_collection() {
    let library = NoteLibrary::new();
    let before = library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = library.load_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Source(SourceError::ReadError { .. })
    ));
    assert!(Arc::ptr_eq(&before, &library.snapshot()));
}

#[test]
fn selection_survives_swap_when_id_still_present() {
    let library = NoteLibrary::new();
    library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024"), ("b", "Beta", "02/01/2024")]))
        .unwrap();
    assert!(library.select(&NoteId::from("a")));

    library
        .load_text(&payload(&[("a", "Alpha v2", "05/01/2024")]))
        .unwrap();
    let selected = library.selected_note().unwrap();
    assert_eq!(selected.title(), "Alpha v2");
}

#[test]
fn selection_is_cleared_when_id_disappears() {
    let library = NoteLibrary::new();
    library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();
    assert!(library.select(&NoteId::from("a")));

    library
        .load_text(&payload(&[("z", "Zeta", "01/01/2024")]))
        .unwrap();
    assert!(library.selected_note().is_none());

    library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();
    assert!(library.selected_note().is_none());
}

#[test]
fn selecting_unknown_id_keeps_previous_selection() {
    let library = NoteLibrary::new();
    library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();
    assert!(library.select(&NoteId::from("a")));
    assert!(!library.select(&NoteId::from("nope")));
    assert_eq!(library.selected_note().unwrap().id(), &NoteId::from("a"));

    library.clear_selection();
    assert!(library.selected_note().is_none());
}

#[test]
fn failed_load_keeps_selection() {
    let library = NoteLibrary::new();
    library
        .load_text(&payload(&[("a", "Alpha", "01/01/2024")]))
        .unwrap();
    library.select(&NoteId::from("a"));

    assert!(library.load_text("[").is_err());
    assert!(library.selected_note().is_some());
}

#[test]
fn grouped_view_filters_then_groups() {
    let library = NoteLibrary::new();
    library
        .load_text(&payload(&[
            ("1", "Budget", "10/02/2024"),
            ("2", "Trip plan", "05/02/2024"),
            ("3", "budget review", "20/01/2024"),
        ]))
        .unwrap();

    let snapshot = library.snapshot();
    let groups = snapshot.grouped("BUDGET");
    let keys: Vec<&str> = groups.keys().collect();
    assert_eq!(keys, vec!["February 2024", "January 2024"]);
    assert_eq!(snapshot.filter("trip").len(), 1);
    assert!(std::ptr::eq(
        snapshot.filter("trip")[0],
        &snapshot.notes()[1]
    ));
}

#[test]
fn concurrent_loads_never_expose_torn_state() {
    let library = Arc::new(NoteLibrary::new());
    let small = payload(&[("s", "Small", "01/01/2024")]);
    let large = payload(&[
        ("l1", "Large 1", "01/01/2024"),
        ("l2", "Large 2", "02/01/2024"),
        ("l3", "Large 3", "03/01/2024"),
    ]);

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let library = Arc::clone(&library);
            let text = if i % 2 == 0 { small.clone() } else { large.clone() };
            thread::spawn(move || {
                for _ in 0..25 {
                    library.load_text(&text).unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let library = Arc::clone(&library);
        thread::spawn(move || {
            for _ in 0..200 {
                let len = library.snapshot().len();
                assert!(len == 0 || len == 1 || len == 3, "torn collection of {len}");
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    let final_len = library.snapshot().len();
    assert!(final_len == 1 || final_len == 3);
    assert!(!library.is_loading());
}
