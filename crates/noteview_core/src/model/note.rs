//! Imported note record.
//!
//! # Responsibility
//! - Wrap one JSON object from an export payload as a [`Note`].
//! - Extract `id`, `title` and `timestamp` leniently.
//! - Memoize the normalized timestamp for ordering, grouping and display.
//!
//! # Invariants
//! - The original record is kept verbatim and is what a `Note` serializes to.
//! - Missing or oddly-typed fields never fail construction.
//!
//! # See also
//! - `crate::model::timestamp`

use crate::model::timestamp::{normalize_timestamp, NormalizedTimestamp, RawTimestamp};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Opaque note identifier taken from the record's `id` member.
///
/// Any JSON value is accepted; an absent `id` is `null`. Uniqueness is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NoteId(Value);

impl NoteId {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns whether the source record carried no usable id.
    pub fn is_missing(&self) -> bool {
        self.0.is_null()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

/// One note of an imported collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    title: String,
    timestamp: RawTimestamp,
    normalized: NormalizedTimestamp,
    record: Map<String, Value>,
}

impl Note {
    /// Builds a note from one JSON object of the payload.
    ///
    /// Title rules: strings are kept verbatim, numbers and booleans use their
    /// JSON text, everything else becomes empty.
    pub fn from_record(record: Map<String, Value>) -> Self {
        let id = NoteId(record.get("id").cloned().unwrap_or(Value::Null));
        let title = coerce_title(record.get("title"));
        let timestamp = extract_timestamp(record.get("timestamp"));
        let normalized = normalize_timestamp(&timestamp);
        Self {
            id,
            title,
            timestamp,
            normalized,
            record,
        }
    }

    /// Builds a note carrying only the three interpreted members.
    pub fn new(id: impl Into<NoteId>, title: impl Into<String>, timestamp: RawTimestamp) -> Self {
        let id: NoteId = id.into();
        let mut record = Map::new();
        record.insert("id".to_string(), id.0);
        record.insert("title".to_string(), Value::String(title.into()));
        record.insert(
            "timestamp".to_string(),
            serde_json::json!({ "date": timestamp.date, "time": timestamp.time }),
        );
        Self::from_record(record)
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw timestamp as extracted from the record.
    pub fn timestamp(&self) -> &RawTimestamp {
        &self.timestamp
    }

    pub fn normalized(&self) -> &NormalizedTimestamp {
        &self.normalized
    }

    pub fn canonical_moment(&self) -> Option<&DateTime<FixedOffset>> {
        self.normalized.canonical_moment.as_ref()
    }

    /// Grouping key (`January 2024`, or `Invalid Date`).
    pub fn month_year_key(&self) -> &str {
        &self.normalized.month_year_key
    }

    /// Looks up any member of the original record, interpreted or not.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.record
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

fn coerce_title(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn extract_timestamp(value: Option<&Value>) -> RawTimestamp {
    let Some(fields) = value.and_then(Value::as_object) else {
        return RawTimestamp::default();
    };
    let member = |name: &str| {
        fields
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    RawTimestamp::new(member("date"), member("time"))
}
