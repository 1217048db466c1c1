//! Store contract shared by remote and local thought sources.

use crate::db::DbError;
use crate::model::thought::{ThoughtRecord, ThoughtValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a single store operation.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Transport failure before a response arrived.
    Transport(String),
    /// Remote answered with a non-success status.
    Status { code: u16, url: String },
    /// Response or row could not be decoded into a record.
    InvalidData(String),
    Validation(ThoughtValidationError),
    /// A previous holder of the connection panicked.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Transport(message) => write!(f, "store request failed: {message}"),
            Self::Status { code, url } => write!(f, "store returned status {code} for `{url}`"),
            Self::InvalidData(message) => write!(f, "invalid thought data: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "store connection lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ThoughtValidationError> for StoreError {
    fn from(value: ThoughtValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Read access to thoughts grouped by folder.
///
/// `Sync` so overview fetches can run concurrently against one store.
pub trait ThoughtStore: Sync {
    /// Returns every record tagged with `folder`; empty when there are none.
    fn list_by_folder(&self, folder: &str) -> StoreResult<Vec<ThoughtRecord>>;
}

impl<S: ThoughtStore + ?Sized> ThoughtStore for &S {
    fn list_by_folder(&self, folder: &str) -> StoreResult<Vec<ThoughtRecord>> {
        (**self).list_by_folder(folder)
    }
}
