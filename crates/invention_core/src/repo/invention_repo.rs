//! Invention repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `inventions` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Title ordering uses SQLite `BINARY` collation (case-sensitive), with
//!   absent titles first; ties fall back to `created_at, id`.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Delete is a hard delete: a removed id never comes back from a read.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::invention::{Invention, InventionId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const INVENTION_SELECT_SQL: &str = "SELECT
    id,
    title,
    details,
    link_string,
    created_at
FROM inventions";

const REQUIRED_COLUMNS: &[&str] = &["id", "title", "details", "link_string", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for invention persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(InventionId),
    InvalidData(String),
    /// Connection was opened without running migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "invention not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted invention data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Sort order for listing inventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InventionSort {
    /// Alphabetical by title, case-sensitive.
    #[default]
    TitleAscending,
    /// Chronological by creation time.
    CreatedAtAscending,
}

/// Query options for listing inventions.
#[derive(Debug, Clone, Default)]
pub struct InventionListQuery {
    pub sort: InventionSort,
}

/// Repository interface for invention CRUD operations.
pub trait InventionRepository {
    fn create_invention(&self, invention: &Invention) -> RepoResult<InventionId>;
    fn update_invention(&self, invention: &Invention) -> RepoResult<()>;
    fn get_invention(&self, id: InventionId) -> RepoResult<Option<Invention>>;
    fn list_inventions(&self, query: &InventionListQuery) -> RepoResult<Vec<Invention>>;
    fn delete_invention(&self, id: InventionId) -> RepoResult<()>;
}

/// SQLite-backed invention repository.
pub struct SqliteInventionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInventionRepository<'conn> {
    /// Wraps a connection after checking that migrations were applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl InventionRepository for SqliteInventionRepository<'_> {
    fn create_invention(&self, invention: &Invention) -> RepoResult<InventionId> {
        self.conn.execute(
            "INSERT INTO inventions (
                id,
                title,
                details,
                link_string,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                invention.id.to_string(),
                invention.title.as_deref(),
                invention.details.as_deref(),
                invention.link_string.as_deref(),
                invention.created_at,
            ],
        )?;

        Ok(invention.id)
    }

    fn update_invention(&self, invention: &Invention) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE inventions
             SET
                title = ?1,
                details = ?2,
                link_string = ?3
             WHERE id = ?4;",
            params![
                invention.title.as_deref(),
                invention.details.as_deref(),
                invention.link_string.as_deref(),
                invention.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(invention.id));
        }

        Ok(())
    }

    fn get_invention(&self, id: InventionId) -> RepoResult<Option<Invention>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INVENTION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_invention_row(row)?));
        }

        Ok(None)
    }

    fn list_inventions(&self, query: &InventionListQuery) -> RepoResult<Vec<Invention>> {
        let order_by = match query.sort {
            InventionSort::TitleAscending => "title ASC, created_at ASC, id ASC",
            InventionSort::CreatedAtAscending => "created_at ASC, id ASC",
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{INVENTION_SELECT_SQL} ORDER BY {order_by};"))?;
        let mut rows = stmt.query([])?;
        let mut inventions = Vec::new();

        while let Some(row) = rows.next()? {
            inventions.push(parse_invention_row(row)?);
        }

        Ok(inventions)
    }

    fn delete_invention(&self, id: InventionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM inventions WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_invention_row(row: &Row<'_>) -> RepoResult<Invention> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in inventions.id"))
    })?;

    Ok(Invention {
        id,
        title: row.get("title")?,
        details: row.get("details")?,
        link_string: row.get("link_string")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('inventions');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable("inventions"));
    }

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "inventions",
                column,
            });
        }
    }

    Ok(())
}
