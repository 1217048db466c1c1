//! Core logic for Mindshelf, a capture-and-organize thought client.
//!
//! Turns folder snapshots from a thought store into read-only views:
//! inferred due dates and completion, folder statistics, and the ranked
//! "due soon" / "recently updated" slices of the overview.

pub mod analytics;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analytics::completion::is_completed;
pub use analytics::due_date::{days_until_due, extract_due_date, extract_due_date_from_text};
pub use analytics::ranking::{
    rank_thoughts, DueSoonItem, RecentItem, TemporalRanking, DUE_SOON_HORIZON_DAYS, RANKING_LIMIT,
};
pub use analytics::stats::{compute_stats, ThoughtStats};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::thought::{
    Folder, Modality, ThoughtId, ThoughtRecord, ThoughtValidationError, ViewMode,
};
pub use repo::http_store::{FolderInfo, HttpStoreConfig, HttpThoughtStore};
pub use repo::sqlite_store::SqliteThoughtStore;
pub use repo::thought_store::{StoreError, StoreResult, ThoughtStore};
pub use service::overview_service::{
    build_report, merge_by_created_desc, OverviewError, OverviewReport, OverviewService,
};

/// Liveness check used by the CLI `ping` command.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
