//! `invention` command-line front end.
//!
//! # Responsibility
//! - Parse flags, merge them over the optional TOML config.
//! - Bootstrap logging and the database, then dispatch one command.

mod args;
mod commands;
mod error;
mod shell;

use args::Cli;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
