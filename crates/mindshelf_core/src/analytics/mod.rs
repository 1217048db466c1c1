//! Thought analytics and temporal heuristics.
//!
//! # Responsibility
//! - Infer due dates and completion from free-form text.
//! - Summarize a collection into statistics and ranked slices.
//!
//! # Invariants
//! - Every function here is pure: no I/O, no input mutation, no errors.
//! - Evaluation time is always passed in by the caller.

pub mod completion;
pub mod due_date;
pub mod ranking;
pub mod stats;

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Signed fractional days from `from` to `to`.
pub(crate) fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Rounds to one decimal place, half away from zero.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
