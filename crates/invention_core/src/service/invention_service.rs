//! Invention command layer.
//!
//! # Responsibility
//! - Provide the add/delete/commit commands used by every front end.
//! - Log each command outcome and propagate failures to the caller.
//!
//! # Invariants
//! - Each command touches exactly one record and commits before returning.
//! - Failures are returned, never swallowed.

use crate::model::draft::InventionDraft;
use crate::model::invention::{Invention, InventionId};
use crate::repo::invention_repo::{InventionListQuery, InventionRepository, RepoError};
use crate::store::{InventionStore, StoreChange};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Receiver;

pub type CommandResult<T> = Result<T, CommandError>;

/// Error returned by commands and edit-surface transitions.
#[derive(Debug)]
pub enum CommandError {
    /// Target invention does not exist.
    NotFound(InventionId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// An editor is already open for this invention.
    EditorAlreadyOpen(InventionId),
    /// Command requires an open editor.
    NoEditorOpen,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "invention not found: {id}"),
            Self::Repo(err) => write!(f, "failed to save inventions: {err}"),
            Self::EditorAlreadyOpen(id) => {
                write!(f, "an editor is already open for invention {id}")
            }
            Self::NoEditorOpen => write!(f, "no invention is being edited"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Command facade over an observable store.
pub struct InventionService<R: InventionRepository> {
    store: InventionStore<R>,
}

impl<R: InventionRepository> InventionService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            store: InventionStore::new(repo),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        self.store.subscribe()
    }

    /// Creates one invention with placeholder defaults and persists it.
    pub fn add(&mut self) -> CommandResult<Invention> {
        match self.store.create(Invention::new_default()) {
            Ok(created) => {
                info!(
                    "event=invention_create module=service status=ok id={}",
                    created.id
                );
                Ok(created)
            }
            Err(err) => {
                error!(
                    "event=invention_create module=service status=error error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Removes one invention.
    pub fn delete(&mut self, id: InventionId) -> CommandResult<()> {
        match self.store.delete(id) {
            Ok(()) => {
                info!("event=invention_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                error!("event=invention_delete module=service status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Copies a draft back onto its record and commits it.
    pub fn commit(&mut self, draft: &InventionDraft) -> CommandResult<Invention> {
        let invention = draft.to_invention();
        match self.store.update(&invention) {
            Ok(()) => {
                info!(
                    "event=invention_commit module=service status=ok id={} dirty={}",
                    invention.id,
                    draft.is_dirty()
                );
                Ok(invention)
            }
            Err(err) => {
                error!(
                    "event=invention_commit module=service status=error id={} error={}",
                    invention.id, err
                );
                Err(err.into())
            }
        }
    }

    /// Loads one invention, failing with `NotFound` when absent.
    pub fn require(&self, id: InventionId) -> CommandResult<Invention> {
        self.store.get(id)?.ok_or(CommandError::NotFound(id))
    }

    pub fn list(&self, query: &InventionListQuery) -> CommandResult<Vec<Invention>> {
        Ok(self.store.snapshot(query)?)
    }
}
