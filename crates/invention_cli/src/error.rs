use invention_core::db::DbError;
use invention_core::{CommandError, ConfigError, LoggingError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Command(CommandError),
    /// No invention matched the given id or position.
    UnknownTarget(String),
    Shell(String),
    Output(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "failed to open database: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
            Self::UnknownTarget(target) => write!(f, "no invention matches `{target}`"),
            Self::Shell(message) => write!(f, "shell error: {message}"),
            Self::Output(message) => write!(f, "failed to write output: {message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Command(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<CommandError> for CliError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}
