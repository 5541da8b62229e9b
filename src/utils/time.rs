//! Timestamp parsing and formatting helpers.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};

/// Accepted punch timestamp shapes, seconds optional, `T` or space.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_timestamp(raw: &str) -> AppResult<NaiveDateTime> {
    let raw = raw.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    Err(AppError::InvalidTimestamp(raw.to_string()))
}

pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(raw.to_string()))
}

pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}
