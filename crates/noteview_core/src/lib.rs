//! Core ingestion pipeline for the note viewer.
//! Turns exported note payloads into ordered, grouped, searchable collections.

pub mod logging;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod service;
pub mod source;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::collection::{CollectionId, NoteCollection, NoteOrigin};
pub use model::note::{Note, NoteId};
pub use model::timestamp::{
    normalize_timestamp, NormalizedTimestamp, RawTimestamp, DISPLAY_OFFSET_SECONDS,
    INVALID_DISPLAY,
};
pub use pipeline::group::{group_by_month, MonthGroup, MonthGroups};
pub use pipeline::order::{compare_newest_first, order_notes};
pub use pipeline::validate::{validate_payload, ValidationError};
pub use search::title::{filter_by_title, TitleFilter};
pub use service::ingest::{ingest, ingest_from, IngestError, IngestResult};
pub use service::library::NoteLibrary;
pub use source::file::read_note_file;
pub use source::http::{FetchConfig, HttpNoteFetcher, DEFAULT_FETCH_TIMEOUT_SECS};
pub use source::url::{auto_load_url, check_source_url};
pub use source::{NoteFetcher, SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
