//! In-memory search over invention snapshots.
//!
//! # Responsibility
//! - Narrow an ordered snapshot to the records matching a query.
//! - Keep matching rules in core so every front end filters the same way.

pub mod filter;
