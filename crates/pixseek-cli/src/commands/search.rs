//! Search command - one query, scrolled through a number of pages.

use anyhow::Result;
use clap::Args;
use pixseek_core::Outcome;
use tracing::{debug, info};

use super::session::SessionArgs;
use super::ExitCode;

/// Arguments for `pixseek search`.
#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Search terms
    pub query: String,

    /// Pages to load, scrolling to the end after each one
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

/// Run the search command.
///
/// Expects `session` to have been processed through `with_config()` first.
pub async fn run(args: &SearchArgs, session: &SessionArgs) -> Result<ExitCode> {
    let gallery = session.build_gallery()?;
    info!("Searching {:?}, up to {} page(s)", args.query, args.pages);

    let mut outcome = gallery.on_search_submitted(&args.query).await;
    let mut loaded = u32::from(matches!(outcome, Outcome::Rendered { .. }));

    // Each further page is what reaching the bottom of the list would load.
    while loaded < args.pages && matches!(outcome, Outcome::Rendered { .. }) {
        outcome = gallery.on_proximity_triggered().await;
        debug!("Scroll to end: {outcome:?}");
        if matches!(outcome, Outcome::Rendered { .. }) {
            loaded += 1;
        }
    }

    Ok(exit_code(outcome))
}

/// Map the last outcome of a run to the process exit code.
pub(crate) const fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Rendered { .. } | Outcome::Exhausted | Outcome::Ignored => ExitCode::Success,
        Outcome::NoResults => ExitCode::NoResults,
        Outcome::Rejected | Outcome::Failed => ExitCode::Error,
    }
}
