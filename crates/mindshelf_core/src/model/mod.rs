//! Captured-thought data model.
//!
//! # Responsibility
//! - Define the record shape delivered by thought stores.
//! - Name the folders and view modes the overview understands.
//!
//! # Invariants
//! - Records are read-only value objects for every engine component.
//! - `id` is unique within any collection handed to the engine.

pub mod thought;
