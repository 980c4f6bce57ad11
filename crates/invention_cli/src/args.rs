use clap::{Args, Parser, Subcommand, ValueEnum};
use invention_core::{InventionSort, Layout};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "invention", version, about = "Record and search inventions")]
pub struct Cli {
    /// TOML config file.
    #[arg(long, env = "INVENTION_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long, env = "INVENTION_DB", global = true)]
    pub db: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an invention; omitted fields take the defaults.
    Add(FieldArgs),
    /// List inventions as titles.
    List {
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show inventions as cards.
    Grid {
        #[arg(long, short)]
        query: Option<String>,
        /// Fixed column count; adapts to the width when omitted.
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        columns: Option<u16>,
    },
    Show {
        /// Id or unique id prefix.
        target: String,
    },
    /// Edit fields of one invention and commit.
    Edit {
        target: String,
        #[command(flatten)]
        fields: FieldArgs,
        /// Remove the link.
        #[arg(long, conflicts_with = "link")]
        clear_link: bool,
    },
    Delete {
        target: String,
    },
    /// Interactive shell.
    Shell {
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
    },
}

#[derive(Debug, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub details: Option<String>,
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Title,
    Created,
}

impl From<SortArg> for InventionSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Title => Self::TitleAscending,
            SortArg::Created => Self::CreatedAtAscending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Grid,
    MasterDetail,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Grid => Self::Grid,
            LayoutArg::MasterDetail => Self::MasterDetail,
        }
    }
}
