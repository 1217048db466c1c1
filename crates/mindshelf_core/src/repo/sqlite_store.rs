//! SQLite-backed thought snapshot store.
//!
//! # Responsibility
//! - Serve `list_by_folder` from a locally imported snapshot.
//! - Accept snapshot imports through `import_thoughts`, the only write path.
//!
//! # Invariants
//! - Timestamps are stored as epoch milliseconds.
//! - Rows that fail decoding or validation surface as errors, not gaps.

use super::thought_store::{StoreError, StoreResult, ThoughtStore};
use crate::model::thought::{Modality, ThoughtRecord};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::sync::{Mutex, MutexGuard};

const THOUGHT_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    modality,
    source_url,
    image_data_url,
    folder,
    created_at,
    updated_at,
    completed,
    status,
    due_at
FROM thoughts";

/// Snapshot store over one owned SQLite connection.
pub struct SqliteThoughtStore {
    conn: Mutex<Connection>,
}

impl SqliteThoughtStore {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Inserts or fully replaces records by `id` in one transaction;
    /// returns the count written.
    ///
    /// Nothing is written when any record is invalid.
    pub fn import_thoughts(&self, records: &[ThoughtRecord]) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for record in records {
            write_thought(&tx, record)?;
        }
        tx.commit()?;
        debug!(
            "event=snapshot_import module=repo status=ok count={}",
            records.len()
        );
        Ok(records.len())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ThoughtStore for SqliteThoughtStore {
    fn list_by_folder(&self, folder: &str) -> StoreResult<Vec<ThoughtRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{THOUGHT_SELECT_SQL} WHERE folder = ?1;"))?;
        let mut rows = stmt.query([folder])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_thought_row(row)?);
        }
        Ok(records)
    }
}

fn write_thought(conn: &Connection, record: &ThoughtRecord) -> StoreResult<()> {
    record.validate()?;
    conn.execute(
        "INSERT INTO thoughts (
            id,
            title,
            content,
            modality,
            source_url,
            image_data_url,
            folder,
            created_at,
            updated_at,
            completed,
            status,
            due_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            content = excluded.content,
            modality = excluded.modality,
            source_url = excluded.source_url,
            image_data_url = excluded.image_data_url,
            folder = excluded.folder,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at,
            completed = excluded.completed,
            status = excluded.status,
            due_at = excluded.due_at;",
        params![
            record.id.as_str(),
            record.title.as_deref(),
            record.content.as_deref(),
            record.modality.as_str(),
            record.source_url.as_deref(),
            record.image_ref.as_deref(),
            record.folder.as_str(),
            record.created_at.timestamp_millis(),
            record.updated_at.map(|value| value.timestamp_millis()),
            record.completed,
            record.status.as_deref(),
            record.due_at.as_deref(),
        ],
    )?;
    Ok(())
}

fn parse_thought_row(row: &Row<'_>) -> StoreResult<ThoughtRecord> {
    let id: String = row.get("id")?;
    let created_at = parse_millis(row.get("created_at")?, &id, "created_at")?;
    let updated_at = match row.get::<_, Option<i64>>("updated_at")? {
        Some(value) => Some(parse_millis(value, &id, "updated_at")?),
        None => None,
    };
    let modality: String = row.get("modality")?;

    let record = ThoughtRecord {
        title: row.get("title")?,
        content: row.get("content")?,
        modality: Modality::parse(&modality),
        source_url: row.get("source_url")?,
        image_ref: row.get("image_data_url")?,
        folder: row.get("folder")?,
        created_at,
        updated_at,
        completed: row.get("completed")?,
        status: row.get("status")?,
        due_at: row.get("due_at")?,
        id,
    };
    record.validate()?;
    Ok(record)
}

fn parse_millis(value: i64, id: &str, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "timestamp `{value}` out of range in thoughts.{column} for `{id}`"
        ))
    })
}
