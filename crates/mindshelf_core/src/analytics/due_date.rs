//! Due-date extraction.
//!
//! Precedence, first hit wins:
//! 1. `due` + optional `:`/whitespace + `YYYY-MM-DD` in the text.
//! 2. `due in <N> day(s)` / `due in <N>d` in the text, relative to `now`.
//! 3. The record's structured `due_at` field.
//!
//! A pattern whose capture does not parse is treated as absent.

use crate::model::thought::{parse_timestamp, ThoughtRecord};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static DUE_ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bdue[:\s]*(\d{4}-\d{2}-\d{2})\b").expect("valid due date regex")
});
static DUE_IN_DAYS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bdue\s+in\s+(\d+)\s*(?:days?|d)\b").expect("valid due-in regex")
});

/// Extracts the due date for one record.
pub fn extract_due_date(record: &ThoughtRecord, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    extract_due_date_from_text(&record.combined_text(), record.due_at.as_deref(), now)
}

/// Extracts a due date from text, falling back to a structured value.
pub fn extract_due_date_from_text(
    text: &str,
    explicit_due: Option<&str>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    due_from_iso_hint(text)
        .or_else(|| due_from_relative_hint(text, now))
        .or_else(|| explicit_due.and_then(parse_due_value))
}

/// Days until `due`, rounded up. Negative means overdue.
pub fn days_until_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    super::days_between(now, due).ceil() as i64
}

/// Parses a structured due value with the store timestamp formats.
pub fn parse_due_value(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}

fn due_from_iso_hint(text: &str) -> Option<DateTime<Utc>> {
    let caps = DUE_ISO_DATE_RE.captures(text)?;
    parse_calendar_date(caps.get(1)?.as_str())
}

fn due_from_relative_hint(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let caps = DUE_IN_DAYS_RE.captures(text)?;
    let days: i64 = caps.get(1)?.as_str().parse().ok()?;
    let offset = Duration::try_days(days)?;
    now.checked_add_signed(offset)
}

fn parse_calendar_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
