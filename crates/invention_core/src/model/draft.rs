//! Editable working copy of one invention.
//!
//! # Invariants
//! - A draft never aliases the stored record; edits stay local until
//!   [`InventionDraft::apply_to`] copies them back.
//! - `id` and `created_at` are not editable through a draft.

use crate::model::invention::{Invention, InventionId};

/// Field addressed by an edit-surface input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Details,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventionDraft {
    id: InventionId,
    original: Invention,
    pub title: Option<String>,
    pub details: Option<String>,
    pub link_string: Option<String>,
}

impl InventionDraft {
    /// Copies the editable fields of `invention` into a new draft.
    pub fn open(invention: &Invention) -> Self {
        Self {
            id: invention.id,
            original: invention.clone(),
            title: invention.title.clone(),
            details: invention.details.clone(),
            link_string: invention.link_string.clone(),
        }
    }

    pub fn id(&self) -> InventionId {
        self.id
    }

    /// Replaces one field. An empty value for the link clears it.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = Some(value),
            DraftField::Details => self.details = Some(value),
            DraftField::Link if value.is_empty() => self.link_string = None,
            DraftField::Link => self.link_string = Some(value),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.title != self.original.title
            || self.details != self.original.details
            || self.link_string != self.original.link_string
    }

    /// Copies draft fields back onto `target`.
    pub fn apply_to(&self, target: &mut Invention) {
        target.title = self.title.clone();
        target.details = self.details.clone();
        target.link_string = self.link_string.clone();
    }

    /// Returns the record the draft would commit.
    pub fn to_invention(&self) -> Invention {
        let mut invention = self.original.clone();
        self.apply_to(&mut invention);
        invention
    }
}
