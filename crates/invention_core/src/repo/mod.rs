//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for invention records.
//! - Isolate SQLite query details from command orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Every write is a single-row, single-statement commit.

pub mod invention_repo;
