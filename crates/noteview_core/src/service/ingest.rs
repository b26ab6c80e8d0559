//! Ingestion orchestrator.
//!
//! # Responsibility
//! - Parse raw payload text as JSON.
//! - Run the validator and the ordering stage.
//! - Classify failures into [`IngestError`].
//!
//! # Invariants
//! - Pure: no shared state is read or written here.
//! - Per-note timestamp problems never fail the batch.
//! - Collaborator failures are surfaced unchanged as `IngestError::Source`.

use crate::model::collection::{NoteCollection, NoteOrigin};
use crate::pipeline::order::order_notes;
use crate::pipeline::validate::{validate_payload, ValidationError};
use crate::source::SourceError;
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type IngestResult<T> = Result<T, IngestError>;

/// Classified failure of one ingestion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// Text is not a parseable JSON document.
    MalformedPayload { message: String },
    /// JSON parsed but is not an array of note records.
    InvalidFormat(ValidationError),
    /// Fetch or file collaborator failure, passed through.
    Source(SourceError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPayload { message } => write!(f, "invalid JSON format: {message}"),
            Self::InvalidFormat(err) => write!(f, "invalid data format: {err}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedPayload { .. } => None,
            Self::InvalidFormat(err) => Some(err),
            Self::Source(err) => Some(err),
        }
    }
}

impl From<ValidationError> for IngestError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidFormat(value)
    }
}

impl From<SourceError> for IngestError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Ingests payload text handed over directly by the caller.
pub fn ingest(raw_text: &str) -> IngestResult<NoteCollection> {
    ingest_from(NoteOrigin::Inline, raw_text)
}

/// Ingests payload text and records where it came from.
pub fn ingest_from(origin: NoteOrigin, raw_text: &str) -> IngestResult<NoteCollection> {
    let payload: Value = serde_json::from_str(raw_text).map_err(|err| {
        warn!(
            "event=ingest module=service status=error reason=malformed_payload line={} column={}",
            err.line(),
            err.column()
        );
        IngestError::MalformedPayload {
            message: err.to_string(),
        }
    })?;

    let notes = validate_payload(payload).map_err(|err| {
        warn!("event=ingest module=service status=error reason=invalid_format detail=\"{err}\"");
        IngestError::from(err)
    })?;

    let collection = NoteCollection::from_ordered(origin, order_notes(notes));
    info!(
        "event=ingest module=service status=ok collection={} notes={} invalid_timestamps={}",
        collection.id(),
        collection.len(),
        collection.invalid_timestamp_count()
    );
    Ok(collection)
}
