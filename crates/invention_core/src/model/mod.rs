//! Domain model for invention records.
//!
//! # Responsibility
//! - Define the single persisted record type and its display helpers.
//! - Define the editable draft used by the edit surface.
//!
//! # Invariants
//! - Every invention is identified by a stable `InventionId`.
//! - Text fields are independent; none is derived from another.

pub mod draft;
pub mod invention;
