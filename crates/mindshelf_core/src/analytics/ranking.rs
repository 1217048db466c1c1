//! Due-soon and recently-updated ranking.
//!
//! # Invariants
//! - Both slices hold at most `RANKING_LIMIT` items.
//! - Due-soon only holds records with a known due date no later than
//!   `DUE_SOON_HORIZON_DAYS` from now; overdue records stay in.
//! - Timestamp ties are broken by `id` ascending.

use super::due_date::{days_until_due, extract_due_date};
use super::days_between;
use crate::model::thought::ThoughtRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum length of each ranked slice.
pub const RANKING_LIMIT: usize = 6;
/// Due-soon horizon in days, inclusive.
pub const DUE_SOON_HORIZON_DAYS: i64 = 7;

/// Record ranked by due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueSoonItem {
    pub record: ThoughtRecord,
    pub due_at: DateTime<Utc>,
    /// Rounded up; negative means overdue by that many days.
    pub days_until_due: i64,
}

/// Record ranked by last update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentItem {
    pub record: ThoughtRecord,
    pub due_at: Option<DateTime<Utc>>,
    /// Whole days since the effective update time, never negative.
    pub days_since_update: i64,
}

/// Both ranked slices for one evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemporalRanking {
    pub due_soon: Vec<DueSoonItem>,
    pub recently_updated: Vec<RecentItem>,
}

pub fn rank_thoughts(records: &[ThoughtRecord], now: DateTime<Utc>) -> TemporalRanking {
    TemporalRanking {
        due_soon: due_soon(records, now),
        recently_updated: recently_updated(records, now),
    }
}

pub fn due_soon(records: &[ThoughtRecord], now: DateTime<Utc>) -> Vec<DueSoonItem> {
    let mut candidates: Vec<(&ThoughtRecord, DateTime<Utc>, i64)> = records
        .iter()
        .filter_map(|record| {
            let due = extract_due_date(record, now)?;
            let days = days_until_due(due, now);
            (days <= DUE_SOON_HORIZON_DAYS).then_some((record, due, days))
        })
        .collect();

    candidates.sort_by(|(left, left_due, _), (right, right_due, _)| {
        left_due.cmp(right_due).then_with(|| left.id.cmp(&right.id))
    });

    candidates
        .into_iter()
        .take(RANKING_LIMIT)
        .map(|(record, due_at, days_until_due)| DueSoonItem {
            record: record.clone(),
            due_at,
            days_until_due,
        })
        .collect()
}

pub fn recently_updated(records: &[ThoughtRecord], now: DateTime<Utc>) -> Vec<RecentItem> {
    let mut ordered: Vec<&ThoughtRecord> = records.iter().collect();
    ordered.sort_by(|left, right| {
        right
            .effective_updated_at()
            .cmp(&left.effective_updated_at())
            .then_with(|| left.id.cmp(&right.id))
    });

    ordered
        .into_iter()
        .take(RANKING_LIMIT)
        .map(|record| RecentItem {
            record: record.clone(),
            due_at: extract_due_date(record, now),
            days_since_update: days_between(record.effective_updated_at(), now)
                .floor()
                .max(0.0) as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{due_soon, rank_thoughts, recently_updated, RANKING_LIMIT};
    use crate::model::thought::{Modality, ThoughtRecord};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
    }

    fn with_due_in(id: &str, days: i64) -> ThoughtRecord {
        let mut record =
            ThoughtRecord::with_id(id, "tasks", Modality::Text, now() - Duration::days(30));
        record.due_at = Some((now() + Duration::days(days)).to_rfc3339());
        record
    }

    #[test]
    fn due_soon_keeps_overdue_and_horizon_items_in_due_order() {
        let offsets = [-5, 20, 3, 7, 8, 0, 14, 1, 10, 6];
        let records: Vec<ThoughtRecord> = offsets
            .iter()
            .enumerate()
            .map(|(index, days)| with_due_in(&format!("r{index}"), *days))
            .collect();

        let slice = due_soon(&records, now());
        let days: Vec<i64> = slice.iter().map(|item| item.days_until_due).collect();
        assert_eq!(days, vec![-5, 0, 1, 3, 6, 7]);
        assert!(slice.len() <= RANKING_LIMIT);
    }

    #[test]
    fn due_soon_truncates_to_limit() {
        let records: Vec<ThoughtRecord> = (0..9)
            .map(|index| with_due_in(&format!("r{index}"), index - 2))
            .collect();
        let slice = due_soon(&records, now());
        assert_eq!(slice.len(), RANKING_LIMIT);
        assert_eq!(slice[0].record.id, "r0");
        assert_eq!(slice[5].record.id, "r5");
    }

    #[test]
    fn due_soon_excludes_records_without_due_date() {
        let undated = ThoughtRecord::with_id("plain", "notes", Modality::Text, now());
        let dated = with_due_in("dated", 2);
        let slice = due_soon(&[undated, dated], now());
        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].record.id, "dated");
    }

    #[test]
    fn due_soon_breaks_ties_by_id() {
        let records = vec![with_due_in("b", 2), with_due_in("a", 2)];
        let ids: Vec<String> = due_soon(&records, now())
            .into_iter()
            .map(|item| item.record.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn text_hint_overrides_field_when_ranking() {
        let mut record = with_due_in("hinted", 30);
        record.content = Some("due in 2 days".to_string());
        let slice = due_soon(&[record], now());
        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].days_until_due, 2);
    }

    #[test]
    fn recently_updated_orders_by_effective_update_time() {
        let mut edited = ThoughtRecord::with_id(
            "edited",
            "notes",
            Modality::Text,
            now() - Duration::days(20),
        );
        edited.updated_at = Some(now() - Duration::hours(1));
        let fresh =
            ThoughtRecord::with_id("fresh", "notes", Modality::Text, now() - Duration::hours(5));
        let stale =
            ThoughtRecord::with_id("stale", "notes", Modality::Link, now() - Duration::days(3));

        let slice = recently_updated(&[stale, fresh, edited], now());
        let ids: Vec<&str> = slice.iter().map(|item| item.record.id.as_str()).collect();
        assert_eq!(ids, vec!["edited", "fresh", "stale"]);
        assert_eq!(slice[0].days_since_update, 0);
        assert_eq!(slice[2].days_since_update, 3);
        assert_eq!(slice[2].due_at, None);
    }

    #[test]
    fn recently_updated_takes_every_record_up_to_limit() {
        let records: Vec<ThoughtRecord> = (0..10)
            .map(|index| {
                ThoughtRecord::with_id(
                    format!("r{index}"),
                    "inbox",
                    Modality::Text,
                    now() - Duration::hours(index),
                )
            })
            .collect();
        let ranking = rank_thoughts(&records, now());
        assert_eq!(ranking.recently_updated.len(), RANKING_LIMIT);
        assert_eq!(ranking.recently_updated[0].record.id, "r0");
        assert!(ranking.due_soon.is_empty());
    }

    #[test]
    fn empty_collection_ranks_to_empty_slices() {
        let ranking = rank_thoughts(&[], now());
        assert!(ranking.due_soon.is_empty());
        assert!(ranking.recently_updated.is_empty());
    }
}
