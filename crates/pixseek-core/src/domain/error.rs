//! Error types surfaced by the pagination core.

use thiserror::Error;

use super::SessionId;

/// Transport or decode failure reported by a result source.
///
/// Wraps the adapter's error chain so the core never depends on the HTTP
/// stack it happens to be running against.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct FetchError(#[from] anyhow::Error);

impl FetchError {
    /// Creates a fetch error from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }

    /// The underlying error chain.
    #[must_use]
    pub const fn cause(&self) -> &anyhow::Error {
        &self.0
    }
}

/// Errors returned by [`PaginationController`](crate::PaginationController).
///
/// The first three are user-facing and end up as failure notices. The rest
/// describe guard decisions and are never shown to the user.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was empty after trimming.
    #[error("Oops, the search is empty")]
    InvalidQuery,

    /// The first page of a query came back without records.
    #[error("Sorry, there is no {query}")]
    EmptyResult {
        /// The trimmed query that matched nothing.
        query: String,
    },

    /// The result source failed; the page cursor was not advanced.
    #[error("{cause:#}", cause = .0.cause())]
    FetchFailed(#[from] FetchError),

    /// `fetch_page` was called before any query was started.
    #[error("no search is active")]
    NoActiveQuery,

    /// Another fetch for this controller is still outstanding.
    #[error("fetch for session {0} is still in flight")]
    Busy(SessionId),

    /// The response belonged to a session that has since been reset.
    #[error("discarded response for superseded session {0}")]
    Stale(SessionId),
}

impl SearchError {
    /// Returns true for outcomes that are swallowed instead of reported.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::NoActiveQuery | Self::Busy(_) | Self::Stale(_))
    }
}
