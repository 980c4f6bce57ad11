//! Text presentation of invention snapshots.
//!
//! # Responsibility
//! - Render the filtered view as a master-detail list or a card grid.
//! - Own the truncation rules (title 2 lines, details 4, link 1).
//!
//! # Invariants
//! - Rendering is pure: output depends only on the records passed in.

pub mod card;
pub mod layout;

pub use card::{Card, CARD_DETAIL_LINES, CARD_LINK_LINES, CARD_TITLE_LINES};
pub use layout::{render_detail, render_grid, render_list, GridLayout, Layout, DETAIL_PLACEHOLDER};
