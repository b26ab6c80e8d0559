//! File-read collaborator.

use crate::source::{SourceError, SourceResult};
use log::warn;
use std::path::Path;

/// Reads a payload file as UTF-8 text.
///
/// Unlike the HTTP fetcher, an empty file is returned as-is and rejected later
/// by the JSON parser.
pub fn read_note_file(path: &Path) -> SourceResult<String> {
    std::fs::read_to_string(path).map_err(|err| {
        warn!(
            "event=file_read module=source status=error kind={:?}",
            err.kind()
        );
        SourceError::ReadError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })
}
