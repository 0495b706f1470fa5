//! Pagination controller: the fetch-state machine behind infinite scrolling.
//!
//! The controller owns the [`QueryState`] of the one active search and routes
//! every mutation through [`reset`](PaginationController::reset) and
//! [`fetch_page`](PaginationController::fetch_page). Both the submit handler
//! and the proximity handler share a single controller by reference.
//!
//! Two guards keep the bookkeeping consistent while a request is awaited:
//!
//! - a busy phase ([`Phase::Fetching`]) rejects a second `fetch_page` until the
//!   first one resolves, so the page cursor can only advance by one;
//! - a session token ([`SessionId`]) bumped by every `reset`, so a response for
//!   a superseded query is dropped instead of being applied to the new one.
//!
//! The state lock is never held across the `.await` on the result source.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::domain::{QueryState, ResultPage, SearchError, SessionId};
use crate::ports::ResultSource;

/// Whether a request is outstanding, and for which session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight.
    #[default]
    Idle,
    /// A request for the given session is awaiting its response.
    Fetching(SessionId),
}

/// Coarse pagination status, derived from the query state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No query has been started.
    Idle,
    /// A query is set but no page has been applied yet.
    Ready,
    /// At least one page applied and more remain.
    Paging,
    /// Every available record has been fetched.
    Exhausted,
}

#[derive(Debug, Default)]
struct Inner {
    session: SessionId,
    query: Option<QueryState>,
    phase: Phase,
}

impl Inner {
    /// Leaves the busy phase if it still belongs to `session`.
    fn release(&mut self, session: SessionId) {
        if self.phase == Phase::Fetching(session) {
            self.phase = Phase::Idle;
        }
    }
}

/// Clears the busy phase if the fetch future is dropped before completing.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    session: SessionId,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.inner).release(self.session);
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the pagination state of one search at a time.
pub struct PaginationController<S> {
    source: S,
    page_size: u32,
    inner: Mutex<Inner>,
}

impl<S: ResultSource> PaginationController<S> {
    /// Creates an idle controller fetching `page_size` records per page.
    #[must_use]
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The wrapped result source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Records requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Starts a new search session for `raw`.
    ///
    /// Replaces any previous state entirely and invalidates a request that may
    /// still be in flight for the previous session. No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if `raw` is blank; the current
    /// state is left untouched in that case.
    pub fn reset(&self, raw: &str) -> Result<SessionId, SearchError> {
        let state = QueryState::new(raw, self.page_size)?;
        let mut inner = lock(&self.inner);
        if let Phase::Fetching(stale) = inner.phase {
            debug!("Superseding in-flight fetch for session {stale}");
        }
        inner.session = inner.session.next();
        inner.phase = Phase::Idle;
        info!("Session {} started for {:?}", inner.session, state.query());
        inner.query = Some(state);
        Ok(inner.session)
    }

    /// Fetches the page at the cursor and folds it into the state.
    ///
    /// Once the query is exhausted this returns an empty page and changes
    /// nothing. On failure the cursor is not advanced, so the next call
    /// retries the same page.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoActiveQuery`] before the first `reset`
    /// - [`SearchError::Busy`] while another fetch is outstanding
    /// - [`SearchError::Stale`] if `reset` was called while awaiting
    /// - [`SearchError::EmptyResult`] if the first page has no records
    /// - [`SearchError::FetchFailed`] if the source failed
    pub async fn fetch_page(&self) -> Result<ResultPage, SearchError> {
        let (session, query, page) = {
            let mut inner = lock(&self.inner);
            let session = inner.session;
            let Some(state) = inner.query.as_ref() else {
                return Err(SearchError::NoActiveQuery);
            };
            if let Phase::Fetching(active) = inner.phase {
                debug!("Rejecting fetch while session {active} is busy");
                return Err(SearchError::Busy(active));
            }
            if state.is_exhausted() {
                debug!(
                    "Session {session} exhausted at {}/{}",
                    state.fetched_count(),
                    state.total_available()
                );
                return Ok(ResultPage::empty(state.total_available()));
            }
            let request = (session, state.query().to_owned(), state.current_page());
            inner.phase = Phase::Fetching(session);
            request
        };

        let mut in_flight = InFlight {
            inner: &self.inner,
            session,
            armed: true,
        };
        debug!("Fetching page {page} of {query:?} (session {session})");
        let response = self.source.search(&query, page, self.page_size).await;

        let mut inner = lock(&self.inner);
        in_flight.armed = false;
        inner.release(session);
        if inner.session != session {
            debug!("Dropping page {page} of {query:?}: session {session} superseded");
            return Err(SearchError::Stale(session));
        }

        let result = match response {
            Ok(result) => result,
            Err(e) => {
                warn!("Fetching page {page} of {query:?} failed: {:#}", e.cause());
                return Err(SearchError::FetchFailed(e));
            }
        };

        let Some(state) = inner.query.as_mut() else {
            return Err(SearchError::Stale(session));
        };
        if state.current_page() == 1 && result.is_empty() {
            info!("No matches for {query:?}");
            return Err(SearchError::EmptyResult { query });
        }
        state.apply(&result);
        debug!(
            "Applied page {page}: {} records, {}/{} fetched",
            result.len(),
            state.fetched_count(),
            state.total_available()
        );
        Ok(result)
    }

    /// True iff a query is active and more records can be fetched.
    #[must_use]
    pub fn has_more(&self) -> bool {
        lock(&self.inner).query.as_ref().is_some_and(QueryState::has_more)
    }

    /// True while a fetch is awaiting its response.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(lock(&self.inner).phase, Phase::Fetching(_))
    }

    /// Current busy phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        lock(&self.inner).phase
    }

    /// Token of the current session.
    #[must_use]
    pub fn session(&self) -> SessionId {
        lock(&self.inner).session
    }

    /// Coarse status of the active query.
    #[must_use]
    pub fn status(&self) -> Status {
        match lock(&self.inner).query.as_ref() {
            None => Status::Idle,
            Some(state) if state.pages_loaded() == 0 => Status::Ready,
            Some(state) if state.has_more() => Status::Paging,
            Some(_) => Status::Exhausted,
        }
    }

    /// A copy of the active query state, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<QueryState> {
        lock(&self.inner).query.clone()
    }
}

impl<S> std::fmt::Debug for PaginationController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("page_size", &self.page_size)
            .field("inner", &*lock(&self.inner))
            .finish_non_exhaustive()
    }
}
