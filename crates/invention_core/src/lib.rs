//! Core domain logic for the invention notebook.
//! Front ends (CLI, shell) only talk to this crate through the re-exports below.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::draft::{DraftField, InventionDraft};
pub use model::invention::{
    Invention, InventionId, InventionLink, DEFAULT_TITLE, UNTITLED_PLACEHOLDER,
};
pub use repo::invention_repo::{
    InventionListQuery, InventionRepository, InventionSort, RepoError, RepoResult,
    SqliteInventionRepository,
};
pub use search::filter::{filter_inventions, filter_inventions_by, SearchFields};
pub use service::invention_service::{CommandError, CommandResult, InventionService};
pub use session::{Activation, BrowserSession, SessionState};
pub use store::{ChangeKind, InventionStore, StoreChange};
pub use view::{render_detail, render_grid, render_list, Card, GridLayout, Layout};
