//! Connection bootstrap for file and in-memory snapshots.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const IN_MEMORY_TARGET: &str = ":memory:";

/// Opens a snapshot database file, creating it when missing.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    bootstrap(path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway in-memory snapshot database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap(IN_MEMORY_TARGET.to_string(), Connection::open_in_memory)
}

fn bootstrap(
    target: String,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start target={target}");

    let result = open()
        .and_then(|conn| conn.busy_timeout(BUSY_TIMEOUT).map(|()| conn))
        .map_err(|source| DbError::Open {
            target: target.clone(),
            source,
        })
        .and_then(|mut conn| {
            let found = apply_migrations(&mut conn)?;
            Ok((conn, found))
        });

    match result {
        Ok((conn, found)) => {
            info!(
                "event=db_open module=db status=ok target={target} schema_from={found} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error target={target} duration_ms={} error_code=db_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}
