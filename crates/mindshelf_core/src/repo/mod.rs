//! Thought store contract and its implementations.
//!
//! # Responsibility
//! - Define the one read operation the analytics engine consumes.
//! - Provide a remote HTTP client and a local SQLite snapshot store.
//!
//! # Invariants
//! - `list_by_folder` never returns an invalid record; it fails instead.
//! - Store ordering is unspecified; callers impose their own.

pub mod http_store;
pub mod sqlite_store;
pub mod thought_store;
