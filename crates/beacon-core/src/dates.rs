//! Display-date formatting.
//!
//! The content API returns timestamps like `2024-05-03T09:30:00`. Display
//! surfaces never show the raw ISO form: cards use `YYYY-MM-DD`, detail
//! pages use the long human form. Unparseable input formats to an empty
//! string rather than leaking the raw value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

fn parse(date: &str) -> Option<NaiveDate> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Formats an API timestamp as `YYYY-MM-DD`, or empty when unparseable.
pub fn format_date(date: &str) -> String {
    parse(date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Formats an API timestamp as e.g. "May 3, 2024", or empty when
/// unparseable.
pub fn format_date_long(date: &str) -> String {
    parse(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}
