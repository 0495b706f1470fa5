//! CLI command definitions and handlers.

pub mod browse;
pub mod search;
pub mod session;

use clap::{Parser, Subcommand};

/// Pixseek - Infinite-scrolling image search
#[derive(Parser)]
#[command(name = "pixseek")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared session arguments (API, trigger, output).
    #[command(flatten)]
    pub session: session::SessionArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search and print results, scrolling through a number of pages
    Search(search::SearchArgs),
    /// Interactive search: one query per line, empty line scrolls
    Browse,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Results were shown.
    Success = 0,
    /// The query matched nothing.
    NoResults = 1,
    /// Invalid input, configuration or request failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
