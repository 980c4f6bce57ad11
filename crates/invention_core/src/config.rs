//! Application configuration.
//!
//! # Responsibility
//! - Load optional TOML settings for database, logging and presentation.
//! - Apply defaults for every key a file leaves out.
//!
//! # Invariants
//! - `grid_columns`, when set, is at least 1.
//! - `log_dir`, when set, is absolute (checked again by `init_logging`).

use crate::logging::default_log_level;
use crate::search::filter::SearchFields;
use crate::view::Layout;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Database file used when neither config nor flags name one.
pub const DEFAULT_DB_FILE_NAME: &str = "inventions.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "failed to parse config `{}`: {message}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub layout: Layout,
    /// Fixed grid column count; adaptive when absent.
    pub grid_columns: Option<usize>,
    /// Whether search also matches the link text.
    pub search_link: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            layout: Layout::default(),
            grid_columns: None,
            search_link: true,
        }
    }
}

impl AppConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse {
            path: PathBuf::new(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_columns == Some(0) {
            return Err(ConfigError::Invalid(
                "grid_columns must be at least 1".to_string(),
            ));
        }
        if let Some(dir) = self.log_dir.as_ref() {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn search_fields(&self) -> SearchFields {
        if self.search_link {
            SearchFields::ALL
        } else {
            SearchFields::TITLE_AND_DETAILS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DEFAULT_DB_FILE_NAME};
    use crate::search::filter::SearchFields;
    use crate::view::Layout;
    use std::path::PathBuf;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.layout, Layout::Grid);
        assert_eq!(config.search_fields(), SearchFields::ALL);
    }

    #[test]
    fn parses_all_keys() {
        let config = AppConfig::from_toml_str(
            r#"
db_path = "/tmp/inventions.db"
log_level = "warn"
layout = "master_detail"
grid_columns = 3
search_link = false
"#,
        )
        .unwrap();
        assert_eq!(config.layout, Layout::MasterDetail);
        assert_eq!(config.grid_columns, Some(3));
        assert_eq!(config.search_fields(), SearchFields::TITLE_AND_DETAILS);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn rejects_zero_columns_and_unknown_keys() {
        let err = AppConfig::from_toml_str("grid_columns = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
