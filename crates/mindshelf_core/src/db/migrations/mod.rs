//! Schema migrations for the local thought snapshot.
//!
//! # Invariants
//! - The applied version lives in `PRAGMA user_version`.
//! - All pending steps commit together or not at all.
//! - A snapshot written by a newer binary is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

/// `(version, sql)` steps in ascending version order.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Latest schema version this build can read.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings the snapshot schema up to `latest_version()`; returns the version
/// found before migrating.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();
    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion { found, latest });
    }

    let pending: Vec<&(u32, &str)> = SCHEMA_STEPS
        .iter()
        .skip_while(|(version, _)| *version <= found)
        .collect();
    if pending.is_empty() {
        return Ok(found);
    }

    let tx = conn.transaction()?;
    for &(version, sql) in pending {
        tx.execute_batch(sql)
            .map_err(|source| DbError::Migration { version, source })?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;
    debug!("event=db_migrate module=db status=ok from={found} to={latest}");

    Ok(found)
}
