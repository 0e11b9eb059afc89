use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use serde_json::Value;

use crate::format::zone::Zone;

/// Largest distance from the epoch, in milliseconds, that is still a date.
pub const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Anything that can be turned into a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch.
    Timestamp(f64),
    /// A date string, parsed when formatted.
    Text(String),
    DateTime(DateTime<Utc>),
    /// Input that is known up front not to be a date.
    Invalid,
}

impl DateInput {
    /// The instant this input denotes, or `None` if it is not a date.
    ///
    /// `zone` is used only for date-times written without an offset.
    pub fn resolve(&self, zone: &Zone) -> Option<DateTime<Utc>> {
        match self {
            DateInput::Timestamp(ms) => from_millis(*ms),
            DateInput::Text(text) => parse_text(text.trim(), zone),
            DateInput::DateTime(dt) => Some(*dt),
            DateInput::Invalid => None,
        }
    }
}

fn from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > MAX_TIMESTAMP_MS {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const LOCAL_MINUTE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

fn parse_text(text: &str, zone: &Zone) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Some(date) = parse_date_only(text) {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    match split_end_of_day(text) {
        Some(midnight) => parse_date_time(&midnight, zone)?.checked_add_signed(TimeDelta::days(1)),
        None => parse_date_time(text, zone),
    }
}

fn parse_date_time(text: &str, zone: &Zone) -> Option<DateTime<Utc>> {
    // "Z" is the same instant as "+00:00"
    let normalized = match text.strip_suffix(&['Z', 'z'][..]) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };

    let parsed = DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
        })
        .map(|dt| dt.with_timezone(&Utc));
    if let Some(dt) = parsed {
        return reject_leap_second(dt);
    }

    if let Some(naive) = LOCAL_DATETIME_FORMATS
        .iter()
        .chain(LOCAL_MINUTE_FORMATS.iter())
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        if naive.nanosecond() >= 1_000_000_000 {
            return None;
        }
        return zone.from_local(&naive);
    }

    DateTime::parse_from_rfc2822(text)
        .ok()
        .and_then(|dt| reject_leap_second(dt.with_timezone(&Utc)))
}

// chrono represents second 60 as nanosecond >= 1e9; no such time exists
// on a calendar without leap seconds.
fn reject_leap_second(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (dt.nanosecond() < 1_000_000_000).then_some(dt)
}

/// `YYYY-MM-DDT24:00[:00[.000]]` is the end of that day. Returns the same
/// text with the hour set to `00`, to be moved one day forward after
/// parsing. Hour 24 with any non-zero field is left for the parser to
/// reject.
fn split_end_of_day(text: &str) -> Option<String> {
    let (date, rest) = (text.get(..10)?, text.get(10..)?);
    let mut chars = rest.chars();
    if !matches!(chars.next(), Some('T' | 't' | ' ')) {
        return None;
    }
    let time = chars.as_str().strip_prefix("24")?;
    let clock_end = time
        .find(|c: char| matches!(c, '+' | '-' | 'Z' | 'z'))
        .unwrap_or(time.len());
    let clock = &time[..clock_end];
    if clock.is_empty() || !clock.starts_with(':') || !clock.chars().all(|c| matches!(c, ':' | '.' | '0')) {
        return None;
    }
    Some(format!("{date}{}00{time}", &rest[..1]))
}

/// `YYYY`, `YYYY-MM` and `YYYY-MM-DD`, which are read as UTC midnight.
fn parse_date_only(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let year = parts.next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = parts.next().map(two_digits).unwrap_or(Some(1))?;
    let day = parts.next().map(two_digits).unwrap_or(Some(1))?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)
}

fn two_digits(part: &str) -> Option<u32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl From<f64> for DateInput {
    fn from(ms: f64) -> Self {
        DateInput::Timestamp(ms)
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::Timestamp(ms as f64)
    }
}

impl From<i32> for DateInput {
    fn from(ms: i32) -> Self {
        DateInput::Timestamp(f64::from(ms))
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::DateTime(dt.with_timezone(&Utc))
    }
}

/// JSON values convert the way a date constructor treats them: `null` is
/// the epoch, booleans are 0 or 1, containers are not dates.
impl From<&Value> for DateInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => DateInput::Timestamp(0.0),
            Value::Bool(b) => DateInput::Timestamp(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64().map_or(DateInput::Invalid, DateInput::Timestamp),
            Value::String(s) => DateInput::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => DateInput::Invalid,
        }
    }
}

impl From<Value> for DateInput {
    fn from(value: Value) -> Self {
        DateInput::from(&value)
    }
}
