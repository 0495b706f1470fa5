//! Output formatting for CLI.

mod jsonl;
mod terminal;

pub use jsonl::JsonlSink;
pub use terminal::TerminalSink;
