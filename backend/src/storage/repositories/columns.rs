//! Text encodings of date and time columns.
//!
//! SQLite has no date types; every format here sorts lexicographically in
//! chronological order, so `ORDER BY` on the raw column is correct.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn parse_timestamp(raw: String) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(&raw)
        .with_context(|| format!("Failed to parse timestamp {}", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

pub(crate) fn parse_optional_timestamp(raw: Option<String>) -> Result<Option<DateTime<Utc>>> {
    raw.map(parse_timestamp).transpose()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).with_context(|| format!("Failed to parse date {}", raw))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date_time(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .with_context(|| format!("Failed to parse date-time {}", raw))
}

pub(crate) fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}
