//! Aggregate statistics over one thought collection.

use super::completion::is_completed;
use super::{days_between, round_one_decimal};
use crate::model::thought::{Modality, ThoughtRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary metrics for a collection at one evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ThoughtStats {
    pub total: usize,
    pub text: usize,
    pub images: usize,
    /// Mean age in days, one decimal.
    pub avg_age_days: f64,
    pub completed: usize,
    /// Integer percentage, 0..=100.
    pub completion_rate: u32,
    /// Age of the freshest record in days, one decimal.
    pub latest_age_days: f64,
}

impl ThoughtStats {
    /// Records that are neither text nor image, floored at zero.
    pub fn other_count(&self) -> usize {
        self.total.saturating_sub(self.text + self.images)
    }
}

/// Age in days since the effective update time, never negative.
pub fn age_in_days(record: &ThoughtRecord, now: DateTime<Utc>) -> f64 {
    days_between(record.effective_updated_at(), now).max(0.0)
}

pub fn compute_stats(records: &[ThoughtRecord], now: DateTime<Utc>) -> ThoughtStats {
    if records.is_empty() {
        return ThoughtStats::default();
    }

    let total = records.len();
    let text = records
        .iter()
        .filter(|record| record.modality == Modality::Text)
        .count();
    let images = records
        .iter()
        .filter(|record| record.has_image() || record.modality == Modality::Image)
        .count();
    let completed = records.iter().filter(|record| is_completed(record)).count();

    let ages: Vec<f64> = records
        .iter()
        .map(|record| age_in_days(record, now))
        .collect();
    let avg_age = ages.iter().sum::<f64>() / total as f64;
    let latest_age = ages.iter().copied().fold(f64::INFINITY, f64::min);

    ThoughtStats {
        total,
        text,
        images,
        avg_age_days: round_one_decimal(avg_age),
        completed,
        completion_rate: (completed as f64 * 100.0 / total as f64).round() as u32,
        latest_age_days: round_one_decimal(latest_age),
    }
}
