//! Pixseek CLI - Infinite-scrolling image search in the terminal.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::session::SessionArgs;
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();
    let session = SessionArgs::with_config(cli.session, &config);

    let result = match cli.command {
        Commands::Search(ref args) => commands::search::run(args, &session).await,
        Commands::Browse => commands::browse::run(&session).await,
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    };

    exit_code.into()
}
