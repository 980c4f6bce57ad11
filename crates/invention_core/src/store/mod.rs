//! Observable invention store.
//!
//! # Responsibility
//! - Wrap a repository and publish one change notification per commit.
//! - Serve ordered snapshots that subscribers re-read after a notification.
//!
//! # Invariants
//! - Notifications are sent only after the repository call succeeded.
//! - `revision` increases by exactly one per published change.

pub mod live;

pub use live::{ChangeKind, InventionStore, StoreChange};
