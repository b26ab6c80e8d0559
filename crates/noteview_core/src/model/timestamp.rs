//! Timestamp normalization for imported notes.
//!
//! # Responsibility
//! - Parse `DD/MM/YYYY` + `HH:MM:SS(<suffix>)` wall-clock fields.
//! - Project them onto the fixed +05:00 display offset.
//! - Derive display strings and the month grouping key from one moment.
//!
//! # Invariants
//! - Source fields are read as UTC; no local timezone is consulted.
//! - Malformed input never fails: it yields `canonical_moment = None` and
//!   the [`INVALID_DISPLAY`] sentinel for every display field.
//! - `month_year_key` and `display_date` always come from the same moment.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed display offset applied to every note (UTC+05:00).
pub const DISPLAY_OFFSET_SECONDS: i32 = 5 * 60 * 60;

/// Display value used for every field of an unparseable timestamp.
pub const INVALID_DISPLAY: &str = "Invalid Date";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?$").expect("valid time regex")
});

/// Raw `timestamp` record as supplied by the exporting application.
///
/// Missing or non-string members are represented as empty strings, which
/// normalize to an invalid moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimestamp {
    /// `DD/MM/YYYY`.
    #[serde(default)]
    pub date: String,
    /// `HH:MM:SS` optionally followed by a `(...)` suffix.
    #[serde(default)]
    pub time: String,
}

impl RawTimestamp {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Canonical moment plus display projections for one raw timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTimestamp {
    /// Source instant expressed in the +05:00 display offset.
    ///
    /// `None` when the raw fields cannot be parsed.
    pub canonical_moment: Option<DateTime<FixedOffset>>,
    /// e.g. `Jan 5, 2024`.
    pub display_date: String,
    /// e.g. `3:30 PM`.
    pub display_time: String,
    /// e.g. `Jan 5`.
    pub day_only: String,
    /// e.g. `January 2024`; used as the grouping key.
    pub month_year_key: String,
}

impl NormalizedTimestamp {
    fn invalid() -> Self {
        Self {
            canonical_moment: None,
            display_date: INVALID_DISPLAY.to_string(),
            display_time: INVALID_DISPLAY.to_string(),
            day_only: INVALID_DISPLAY.to_string(),
            month_year_key: INVALID_DISPLAY.to_string(),
        }
    }

    fn from_moment(moment: DateTime<FixedOffset>) -> Self {
        // `%Y` signs years past 9999; the plain year is wanted everywhere.
        let year = moment.year();
        Self {
            canonical_moment: Some(moment),
            display_date: format!("{}, {year}", moment.format("%b %-d")),
            display_time: moment.format("%-I:%M %p").to_string(),
            day_only: moment.format("%b %-d").to_string(),
            month_year_key: format!("{} {year}", moment.format("%B")),
        }
    }

    /// Returns whether the raw fields parsed into a real moment.
    pub fn is_valid(&self) -> bool {
        self.canonical_moment.is_some()
    }
}

/// Normalizes one raw timestamp into its canonical moment and display fields.
///
/// Never fails; see module invariants for malformed input handling.
pub fn normalize_timestamp(raw: &RawTimestamp) -> NormalizedTimestamp {
    match canonical_moment(raw) {
        Some(moment) => NormalizedTimestamp::from_moment(moment),
        None => NormalizedTimestamp::invalid(),
    }
}

/// Parses the raw fields as UTC and shifts them into the display offset.
pub fn canonical_moment(raw: &RawTimestamp) -> Option<DateTime<FixedOffset>> {
    let date = parse_date(raw.date.as_str())?;
    let time = parse_time(time_prefix(raw.time.as_str()))?;
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECONDS)?;
    Some(NaiveDateTime::new(date, time).and_utc().with_timezone(&offset))
}

/// Returns the part of `time` before the first `(`, trimmed.
fn time_prefix(time: &str) -> &str {
    time.split('(').next().unwrap_or_default().trim()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(value.trim())?;
    let day = caps[1].parse::<u32>().ok()?;
    let month = caps[2].parse::<u32>().ok()?;
    let year = caps[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(value)?;
    let hour = caps[1].parse::<u32>().ok()?;
    let minute = caps[2].parse::<u32>().ok()?;
    let second = match caps.get(3) {
        Some(m) => m.as_str().parse::<u32>().ok()?,
        None => 0,
    };
    let nanos = match caps.get(4) {
        Some(m) => fraction_to_nanos(m.as_str())?,
        None => 0,
    };
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

fn fraction_to_nanos(digits: &str) -> Option<u32> {
    let padded = format!("{digits:0<9}");
    padded.parse::<u32>().ok()
}
