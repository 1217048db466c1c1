//! SQLite bootstrap for the local thought snapshot.
//!
//! A snapshot is a file (or in-memory database) holding the `thoughts`
//! table; it is never read before its schema is current.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Snapshot bootstrap or query failure.
#[derive(Debug)]
pub enum DbError {
    /// The snapshot at `target` could not be opened or configured.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Migration `version` failed and was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// Snapshot was written by a newer schema than this build knows.
    UnsupportedSchemaVersion { found: u32, latest: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open thought snapshot `{target}`: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "snapshot migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion { found, latest } => write!(
                f,
                "snapshot schema version {found} is newer than supported {latest}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
