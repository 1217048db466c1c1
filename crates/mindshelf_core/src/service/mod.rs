//! Use-case services over thought stores.
//!
//! # Responsibility
//! - Assemble the input collection for a view mode.
//! - Hand that collection to the analytics engine and return one report.

pub mod overview_service;
