//! Human-readable sink: numbered result rows on stdout, notices on stderr.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pixseek_core::{ImageRecord, NoticeKind, PresentationSink};

/// Terminal presentation sink.
///
/// Each rendered record occupies one stdout row. The loading indicator is an
/// indicatif spinner on stderr, suspended while rows are printed.
pub struct TerminalSink {
    color: bool,
    shown: AtomicUsize,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalSink {
    /// Creates a sink; `color` enables ANSI styling.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            shown: AtomicUsize::new(0),
            spinner: Mutex::new(None),
        }
    }

    /// Runs `f` with the spinner (if any) hidden.
    fn suspended(&self, f: impl FnOnce()) {
        let spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match spinner.as_ref() {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    fn row(&self, index: usize, record: &ImageRecord) -> String {
        let stats = format!(
            "likes {} views {} comments {} downloads {}",
            record.likes, record.views, record.comments, record.downloads
        );
        if self.color {
            format!(
                "{:>4}. {}  {}  {}",
                index,
                record.caption().bold(),
                stats.dimmed(),
                record.full_url.cyan()
            )
        } else {
            format!(
                "{:>4}. {}  {}  {}",
                index,
                record.caption(),
                stats,
                record.full_url
            )
        }
    }

    fn notice_line(&self, kind: NoticeKind, message: &str) -> String {
        let (mark, line) = match kind {
            NoticeKind::Success => ("✓", message.green()),
            NoticeKind::Failure => ("✗", message.red()),
            NoticeKind::Info => ("ℹ", message.blue()),
        };
        if self.color {
            format!("{mark} {line}")
        } else {
            format!("{mark} {message}")
        }
    }
}

impl PresentationSink for TerminalSink {
    fn clear(&self) {
        self.shown.store(0, Ordering::Relaxed);
    }

    fn render_page(&self, items: &[ImageRecord]) {
        let start = self.shown.fetch_add(items.len(), Ordering::Relaxed);
        let rows: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(i, record)| self.row(start + i + 1, record))
            .collect();
        self.suspended(|| {
            for row in rows {
                println!("{row}");
            }
        });
    }

    fn report_total(&self, total: usize) {
        let header = format!("{total} images");
        self.suspended(|| {
            if self.color {
                println!("{}", header.bold().underline());
            } else {
                println!("{header}");
            }
        });
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        let line = self.notice_line(kind, message);
        self.suspended(|| eprintln!("{line}"));
    }

    fn set_loading(&self, visible: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if visible {
            if spinner.is_none() {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
                {
                    bar.set_style(style);
                }
                bar.set_message("more results below");
                bar.enable_steady_tick(Duration::from_millis(120));
                *spinner = Some(bar);
            }
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        self.set_loading(false);
    }
}
