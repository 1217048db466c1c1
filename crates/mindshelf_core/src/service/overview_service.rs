//! Overview use-case service.
//!
//! # Responsibility
//! - Fetch one folder, or merge the overview folders, from a store.
//! - Compute statistics and ranked slices over the fetched snapshot.
//!
//! # Invariants
//! - Overview fetches run concurrently; any failure fails the whole load.
//! - Analytics never run on a partially fetched collection.
//! - A merged collection is ordered by `created_at DESC, id ASC`.
//! - Single-folder collections are forwarded in store order.

use crate::analytics::ranking::{rank_thoughts, TemporalRanking};
use crate::analytics::stats::{compute_stats, ThoughtStats};
use crate::model::thought::{Folder, ThoughtRecord, ViewMode};
use crate::repo::thought_store::{StoreError, ThoughtStore};
use chrono::{DateTime, Utc};
use log::{error, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for overview use-cases.
#[derive(Debug)]
pub enum OverviewError {
    /// Fetching one folder failed; no report was produced.
    Fetch { folder: String, source: StoreError },
    /// Worker threads for the concurrent fetch could not be started.
    FetchPool(String),
}

impl Display for OverviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { folder, source } => {
                write!(f, "failed to load folder `{folder}`: {source}")
            }
            Self::FetchPool(message) => {
                write!(f, "failed to start folder fetch pool: {message}")
            }
        }
    }
}

impl Error for OverviewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch { source, .. } => Some(source),
            Self::FetchPool(_) => None,
        }
    }
}

/// Everything a presentation layer needs for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewReport {
    pub mode: ViewMode,
    pub stats: ThoughtStats,
    /// `stats.other_count()`, precomputed for display.
    pub other_count: usize,
    #[serde(flatten)]
    pub ranking: TemporalRanking,
}

/// Overview facade over a thought store.
pub struct OverviewService<S: ThoughtStore> {
    store: S,
}

impl<S: ThoughtStore> OverviewService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches the collection a view mode is computed over.
    pub fn load(&self, mode: &ViewMode) -> Result<Vec<ThoughtRecord>, OverviewError> {
        let started_at = Instant::now();
        let result = match mode {
            ViewMode::Overview => self.load_merged(&Folder::OVERVIEW.map(Folder::key)),
            ViewMode::Folder(key) => self.fetch(key),
        };

        match &result {
            Ok(records) => info!(
                "event=overview_load module=service status=ok mode={mode} count={} duration_ms={}",
                records.len(),
                started_at.elapsed().as_millis()
            ),
            Err(OverviewError::Fetch { folder, source }) => error!(
                "event=overview_load module=service status=error mode={mode} folder={folder} duration_ms={} error_code=folder_fetch_failed error={source}",
                started_at.elapsed().as_millis()
            ),
            Err(err @ OverviewError::FetchPool(_)) => error!(
                "event=overview_load module=service status=error mode={mode} duration_ms={} error_code=fetch_pool_failed error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Loads a view and computes its report at `now`.
    pub fn report(
        &self,
        mode: &ViewMode,
        now: DateTime<Utc>,
    ) -> Result<OverviewReport, OverviewError> {
        let records = self.load(mode)?;
        Ok(build_report(mode.clone(), &records, now))
    }

    /// `report` evaluated at the current wall-clock time.
    pub fn report_now(&self, mode: &ViewMode) -> Result<OverviewReport, OverviewError> {
        self.report(mode, Utc::now())
    }

    /// Fetches every folder at once on a pool with one thread per folder,
    /// so blocking store calls overlap regardless of the host's core count.
    fn load_merged(&self, folders: &[&str]) -> Result<Vec<ThoughtRecord>, OverviewError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(folders.len().max(1))
            .thread_name(|index| format!("mindshelf-fetch-{index}"))
            .build()
            .map_err(|err| OverviewError::FetchPool(err.to_string()))?;

        let batches = pool.install(|| {
            folders
                .par_iter()
                .with_max_len(1)
                .map(|folder| self.fetch(folder))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(merge_by_created_desc(batches))
    }

    fn fetch(&self, folder: &str) -> Result<Vec<ThoughtRecord>, OverviewError> {
        self.store
            .list_by_folder(folder)
            .map_err(|source| OverviewError::Fetch {
                folder: folder.to_string(),
                source,
            })
    }
}

/// Computes a report over an already loaded collection.
pub fn build_report(
    mode: ViewMode,
    records: &[ThoughtRecord],
    now: DateTime<Utc>,
) -> OverviewReport {
    let stats = compute_stats(records, now);
    OverviewReport {
        mode,
        other_count: stats.other_count(),
        stats,
        ranking: rank_thoughts(records, now),
    }
}

/// Concatenates folder batches and orders them newest-created first.
pub fn merge_by_created_desc(batches: Vec<Vec<ThoughtRecord>>) -> Vec<ThoughtRecord> {
    let mut merged: Vec<ThoughtRecord> = batches.into_iter().flatten().collect();
    merged.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| left.id.cmp(&right.id))
    });
    merged
}
