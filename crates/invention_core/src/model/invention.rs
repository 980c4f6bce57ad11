//! Invention record.
//!
//! # Responsibility
//! - Define the canonical invention record persisted by the store.
//! - Provide display fallbacks and lenient link parsing for renderers.
//!
//! # Invariants
//! - `id` is stable and never reused for another invention.
//! - `created_at` is assigned once and never rewritten.
//! - `title`, `details` and `link_string` are never validated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for one invention.
pub type InventionId = Uuid;

/// Title given to inventions created through the add command.
pub const DEFAULT_TITLE: &str = "New invention";

/// Placeholder shown in place of an absent or empty title.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

static URL_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

/// One recorded invention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invention {
    pub id: InventionId,
    pub title: Option<String>,
    pub details: Option<String>,
    /// Raw link text as typed; see [`Invention::link`] for the parsed view.
    pub link_string: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Link text accepted by [`Invention::link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventionLink<'a> {
    pub text: &'a str,
    /// Whether the link carries an explicit scheme such as `https:`.
    pub has_scheme: bool,
}

impl Invention {
    /// Creates an invention with the add-command defaults and a fresh id.
    pub fn new_default() -> Self {
        Self::with_id(Uuid::new_v4(), now_epoch_ms())
    }

    /// Creates an invention with the add-command defaults and a caller-provided id.
    pub fn with_id(id: InventionId, created_at: i64) -> Self {
        Self {
            id,
            title: Some(DEFAULT_TITLE.to_string()),
            details: Some(String::new()),
            link_string: None,
            created_at,
        }
    }

    /// Title to render, falling back to [`UNTITLED_PLACEHOLDER`].
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED_PLACEHOLDER,
        }
    }

    pub fn details_text(&self) -> &str {
        self.details.as_deref().unwrap_or("")
    }

    pub fn link_text(&self) -> &str {
        self.link_string.as_deref().unwrap_or("")
    }

    /// Returns the link when it parses as a URL, `None` otherwise.
    ///
    /// Parsing is lenient: relative references (`example.com/x`) are accepted,
    /// anything empty or containing whitespace/control characters is not.
    pub fn link(&self) -> Option<InventionLink<'_>> {
        let raw = self.link_string.as_deref()?;
        parse_link(raw)
    }
}

pub(crate) fn parse_link(raw: &str) -> Option<InventionLink<'_>> {
    if raw.is_empty() || raw.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return None;
    }

    Some(InventionLink {
        text: raw,
        has_scheme: URL_SCHEME_RE.is_match(raw),
    })
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
