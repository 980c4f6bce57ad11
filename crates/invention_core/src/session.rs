//! Per-run browsing session.
//!
//! # Responsibility
//! - Hold the UI-side state: search text, selection, open editor.
//! - Keep a snapshot of the store that is re-read on every change
//!   notification, then filtered for display.
//!
//! # Invariants
//! - At most one editor is open at a time.
//! - The snapshot is never edited in place; only store notifications
//!   replace it.
//! - Selection and editor are cleared when their record disappears.

use crate::model::draft::{DraftField, InventionDraft};
use crate::model::invention::{Invention, InventionId};
use crate::repo::invention_repo::{InventionListQuery, InventionRepository, InventionSort};
use crate::search::filter::{filter_inventions_by, SearchFields};
use crate::service::invention_service::{CommandError, CommandResult, InventionService};
use crate::store::StoreChange;
use crate::view::Layout;
use log::{debug, warn};
use std::sync::mpsc::Receiver;

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing(InventionId),
}

/// Outcome of activating a record in the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Selected(InventionId),
    Editing(InventionId),
}

pub struct BrowserSession<R: InventionRepository> {
    service: InventionService<R>,
    changes: Receiver<StoreChange>,
    sort: InventionSort,
    fields: SearchFields,
    layout: Layout,
    query: String,
    snapshot: Vec<Invention>,
    selected: Option<InventionId>,
    editor: Option<InventionDraft>,
}

impl<R: InventionRepository> BrowserSession<R> {
    pub fn new(
        mut service: InventionService<R>,
        layout: Layout,
        fields: SearchFields,
    ) -> CommandResult<Self> {
        let changes = service.subscribe();
        let sort = InventionSort::default();
        let snapshot = service.list(&InventionListQuery { sort })?;
        Ok(Self {
            service,
            changes,
            sort,
            fields,
            layout,
            query: String::new(),
            snapshot,
            selected: None,
            editor: None,
        })
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn set_sort(&mut self, sort: InventionSort) -> CommandResult<()> {
        self.sort = sort;
        self.reload()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn state(&self) -> SessionState {
        match self.editor.as_ref() {
            Some(draft) => SessionState::Editing(draft.id()),
            None => SessionState::Idle,
        }
    }

    /// Full ordered snapshot, unfiltered.
    pub fn snapshot(&self) -> &[Invention] {
        &self.snapshot
    }

    /// Snapshot narrowed by the current query.
    pub fn visible(&self) -> Vec<&Invention> {
        filter_inventions_by(&self.snapshot, &self.query, self.fields)
    }

    /// Drains pending store notifications and re-reads the snapshot if any
    /// arrived. Returns whether a reload happened.
    pub fn refresh(&mut self) -> CommandResult<bool> {
        let pending = self.changes.try_iter().collect::<Vec<_>>();
        if pending.is_empty() {
            return Ok(false);
        }

        for change in &pending {
            debug!(
                "event=session_change module=session kind={:?} id={} revision={}",
                change.kind, change.id, change.revision
            );
        }
        self.reload()?;
        Ok(true)
    }

    /// Resolves a 1-based position in the visible list, falling back to a
    /// unique id prefix.
    pub fn resolve(&self, token: &str) -> Option<InventionId> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        if let Ok(position) = token.parse::<usize>() {
            let by_position = position
                .checked_sub(1)
                .and_then(|index| self.visible().get(index).map(|invention| invention.id));
            if by_position.is_some() {
                return by_position;
            }
        }

        let lowered = token.to_ascii_lowercase();
        let mut matches = self
            .snapshot
            .iter()
            .filter(|invention| invention.id.to_string().starts_with(&lowered));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id),
            _ => None,
        }
    }

    pub fn select(&mut self, id: Option<InventionId>) {
        let id = id.filter(|id| self.contains(*id));
        self.selected = id;
    }

    pub fn selected(&self) -> Option<&Invention> {
        let id = self.selected?;
        self.snapshot.iter().find(|invention| invention.id == id)
    }

    /// Grid opens the editor; master-detail only selects.
    pub fn activate(&mut self, id: InventionId) -> CommandResult<Activation> {
        match self.layout {
            Layout::Grid => {
                self.open_editor(id)?;
                Ok(Activation::Editing(id))
            }
            Layout::MasterDetail => {
                if !self.contains(id) {
                    return Err(CommandError::NotFound(id));
                }
                self.selected = Some(id);
                Ok(Activation::Selected(id))
            }
        }
    }

    /// Creates a default invention and opens the editor on it.
    pub fn add(&mut self) -> CommandResult<InventionId> {
        if let Some(draft) = self.editor.as_ref() {
            return Err(CommandError::EditorAlreadyOpen(draft.id()));
        }

        let created = self.service.add()?;
        self.refresh()?;
        self.editor = Some(InventionDraft::open(&created));
        Ok(created.id)
    }

    pub fn open_editor(&mut self, id: InventionId) -> CommandResult<()> {
        if let Some(draft) = self.editor.as_ref() {
            return Err(CommandError::EditorAlreadyOpen(draft.id()));
        }

        let invention = self.service.require(id)?;
        self.editor = Some(InventionDraft::open(&invention));
        Ok(())
    }

    pub fn editor(&self) -> Option<&InventionDraft> {
        self.editor.as_ref()
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> CommandResult<()> {
        let draft = self.editor.as_mut().ok_or(CommandError::NoEditorOpen)?;
        draft.set(field, value);
        Ok(())
    }

    /// Commits the open draft and closes the editor.
    ///
    /// On a failed commit the editor stays open with the draft intact. Once
    /// the commit succeeded, a failed snapshot reload is only logged.
    pub fn done(&mut self) -> CommandResult<Invention> {
        let draft = self.editor.take().ok_or(CommandError::NoEditorOpen)?;
        match self.service.commit(&draft) {
            Ok(saved) => {
                if let Err(err) = self.refresh() {
                    warn!(
                        "event=session_reload module=session status=error id={} error={}",
                        saved.id, err
                    );
                }
                Ok(saved)
            }
            Err(err) => {
                self.editor = Some(draft);
                Err(err)
            }
        }
    }

    /// Discards the open draft; the stored record is left untouched.
    pub fn cancel(&mut self) -> CommandResult<InventionId> {
        let draft = self.editor.take().ok_or(CommandError::NoEditorOpen)?;
        Ok(draft.id())
    }

    pub fn delete(&mut self, id: InventionId) -> CommandResult<()> {
        self.service.delete(id)?;
        if self.editor.as_ref().is_some_and(|draft| draft.id() == id) {
            self.editor = None;
        }
        self.refresh()?;
        Ok(())
    }

    fn contains(&self, id: InventionId) -> bool {
        self.snapshot.iter().any(|invention| invention.id == id)
    }

    fn reload(&mut self) -> CommandResult<()> {
        self.snapshot = self.service.list(&InventionListQuery { sort: self.sort })?;
        let stale = self.selected.is_some_and(|id| !self.contains(id));
        if stale {
            self.selected = None;
        }
        Ok(())
    }
}
