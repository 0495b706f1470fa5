//! Pixseek Core - Incremental image search domain logic
//!
//! This crate contains the pagination state machine that drives an
//! infinite-scrolling image gallery, the viewport proximity trigger that asks
//! for more results, and the ports through which the core talks to the remote
//! search API and to whatever renders the gallery.

pub mod domain;
pub mod gallery;
pub mod pagination;
pub mod ports;
pub mod trigger;

pub use domain::{FetchError, ImageRecord, QueryState, ResultPage, SearchError, SessionId};
pub use gallery::{Gallery, Outcome, END_OF_RESULTS};
pub use pagination::{PaginationController, Phase, Status};
pub use ports::{NoticeKind, PresentationSink, ResultSource};
pub use trigger::{ProximityTrigger, Viewport, DEFAULT_MARGIN};
