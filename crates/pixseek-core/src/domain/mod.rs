//! Core domain types for paginated image search.

mod error;
mod page;
mod query;

pub use error::{FetchError, SearchError};
pub use page::{ImageRecord, ResultPage};
pub use query::{QueryState, SessionId};
