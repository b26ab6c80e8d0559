//! Payload shape validation.
//!
//! # Responsibility
//! - Accept only a top-level array of JSON objects.
//! - Turn each object into a [`Note`] without inspecting its members.
//!
//! # Invariants
//! - Missing `title`/`timestamp` members are tolerated, never rejected.
//! - Element order is preserved.

use crate::model::note::Note;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shape error for a parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Top-level value is not an array; carries the JSON type found.
    NotAnArray(&'static str),
    /// Array element at `index` is not an object.
    NotARecord { index: usize, found: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnArray(found) => {
                write!(f, "expected a top-level array of notes, found {found}")
            }
            Self::NotARecord { index, found } => {
                write!(f, "note at index {index} is not an object (found {found})")
            }
        }
    }
}

impl Error for ValidationError {}

/// Validates a parsed payload and converts its records into notes.
pub fn validate_payload(payload: Value) -> Result<Vec<Note>, ValidationError> {
    let Value::Array(elements) = payload else {
        return Err(ValidationError::NotAnArray(json_type_name(&payload)));
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(record) => Ok(Note::from_record(record)),
            other => Err(ValidationError::NotARecord {
                index,
                found: json_type_name(&other),
            }),
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
