//! Browse command - interactive search with a simulated scrolling viewport.
//!
//! The listing is measured in rows: one row per rendered record. Each input
//! line is a new search, an empty line scrolls one viewport down, and `:q`
//! (or end of input) quits.

use anyhow::{Context, Result};
use pixseek_core::{Outcome, Viewport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::session::{CliGallery, SessionArgs};
use super::ExitCode;

/// Commands that end the session.
const QUIT: [&str; 2] = [":q", ":quit"];

/// Simulated scroll position over the listing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scroll {
    offset: f64,
    rows: f64,
}

impl Scroll {
    fn new(rows: u32) -> Self {
        Self {
            offset: 0.0,
            rows: f64::from(rows),
        }
    }

    /// Move one viewport down, stopping with the last row at the bottom.
    fn page_down(&mut self, content_rows: f64) {
        let max_offset = (content_rows - self.rows).max(0.0);
        self.offset = (self.offset + self.rows).min(max_offset);
    }

    fn viewport(self, content_rows: f64) -> Viewport {
        Viewport::new(self.offset, self.rows, content_rows)
    }
}

/// Rows currently in the listing.
#[allow(clippy::cast_precision_loss)]
fn content_rows(gallery: &CliGallery) -> f64 {
    gallery
        .controller()
        .snapshot()
        .map_or(0.0, |state| state.fetched_count() as f64)
}

/// Run the browse command.
///
/// Expects `session` to have been processed through `with_config()` first.
pub async fn run(session: &SessionArgs) -> Result<ExitCode> {
    let gallery = session.build_gallery()?;
    let mut scroll = Scroll::new(session.viewport_rows());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Type a search and press Enter. Empty line scrolls, :q quits.");

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let input = line.trim();
        if QUIT.contains(&input) {
            break;
        }

        if input.is_empty() {
            scroll.page_down(content_rows(&gallery));
            let outcome = gallery
                .on_viewport_changed(scroll.viewport(content_rows(&gallery)))
                .await;
            debug!("Scrolled to row {}: {outcome:?}", scroll.offset);
        } else {
            let outcome = gallery.on_search_submitted(input).await;
            if outcome != Outcome::Ignored && outcome != Outcome::Rejected {
                scroll = Scroll::new(session.viewport_rows());
            }
        }

        // Report the settled geometry so a grown listing re-arms the trigger,
        // or a listing shorter than the viewport loads more.
        gallery
            .on_viewport_changed(scroll.viewport(content_rows(&gallery)))
            .await;
    }

    Ok(ExitCode::Success)
}
