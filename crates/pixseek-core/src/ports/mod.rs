//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the pagination core and the
//! outside world: where results come from and where they are shown.

mod presentation;
mod result_source;

pub use presentation::{NoticeKind, PresentationSink};
pub use result_source::ResultSource;
