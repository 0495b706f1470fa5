//! Per-query pagination state.

use std::fmt;

use super::{ResultPage, SearchError};

/// Token identifying one search session.
///
/// Every successful `reset` produces a new token; responses are only applied
/// when their token still matches the controller's current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pagination progress of one active search.
///
/// Created by `reset`, advanced by each successful fetch and replaced
/// wholesale by the next search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    query: String,
    current_page: u32,
    page_size: u32,
    fetched_count: usize,
    total_available: usize,
}

impl QueryState {
    /// Starts a fresh state for `raw`, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if nothing is left after trimming.
    pub fn new(raw: &str, page_size: u32) -> Result<Self, SearchError> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        Ok(Self {
            query: query.to_owned(),
            current_page: 1,
            page_size,
            fetched_count: 0,
            total_available: 0,
        })
    }

    /// The trimmed query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The next page to fetch (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Records requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Running total of records received so far.
    #[must_use]
    pub const fn fetched_count(&self) -> usize {
        self.fetched_count
    }

    /// Total matches reported by the source, 0 until the first response.
    #[must_use]
    pub const fn total_available(&self) -> usize {
        self.total_available
    }

    /// Number of pages applied so far.
    #[must_use]
    pub const fn pages_loaded(&self) -> u32 {
        self.current_page - 1
    }

    /// True while more records can be fetched.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.fetched_count < self.total_available
    }

    /// True once at least one page was applied and nothing remains.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.current_page > 1 && !self.has_more()
    }

    /// Folds a successful response into the state.
    ///
    /// The total never decreases and never drops below what was fetched. An
    /// empty page past the first one closes the query so that a source which
    /// over-reports its total cannot keep pagination alive forever.
    pub(crate) fn apply(&mut self, page: &ResultPage) {
        self.current_page += 1;
        self.fetched_count += page.len();
        self.total_available = self
            .total_available
            .max(page.total_available)
            .max(self.fetched_count);
        if page.is_empty() {
            self.total_available = self.fetched_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageRecord;

    fn page_of(n: usize, total: usize) -> ResultPage {
        let items = (0..n)
            .map(|i| ImageRecord::new(i as u64, "p", "f", "t"))
            .collect();
        ResultPage::new(items, total)
    }

    #[test]
    fn test_new_trims_query() {
        let state = QueryState::new("  cats \n", 12).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(state.query(), "cats");
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.fetched_count(), 0);
        assert_eq!(state.total_available(), 0);
        assert!(!state.has_more());
        assert!(!state.is_exhausted());
    }

    #[test]
    fn test_new_rejects_blank_query() {
        assert!(matches!(
            QueryState::new(" \t ", 12),
            Err(SearchError::InvalidQuery)
        ));
        assert!(matches!(QueryState::new("", 12), Err(SearchError::InvalidQuery)));
    }

    #[test]
    fn test_apply_accumulates_running_total() {
        let mut state = QueryState::new("cats", 12).unwrap_or_else(|e| panic!("{e}"));
        state.apply(&page_of(12, 30));
        state.apply(&page_of(12, 30));
        assert_eq!(state.fetched_count(), 24);
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.pages_loaded(), 2);
        assert!(state.has_more());
    }

    #[test]
    fn test_apply_never_decreases_total() {
        let mut state = QueryState::new("cats", 12).unwrap_or_else(|e| panic!("{e}"));
        state.apply(&page_of(12, 30));
        state.apply(&page_of(12, 20));
        assert_eq!(state.total_available(), 30);
    }

    #[test]
    fn test_apply_keeps_fetched_within_total() {
        let mut state = QueryState::new("cats", 12).unwrap_or_else(|e| panic!("{e}"));
        state.apply(&page_of(12, 5));
        assert_eq!(state.total_available(), 12);
        assert!(state.is_exhausted());
    }

    #[test]
    fn test_empty_page_mid_query_exhausts() {
        let mut state = QueryState::new("cats", 12).unwrap_or_else(|e| panic!("{e}"));
        state.apply(&page_of(12, 100));
        state.apply(&page_of(0, 100));
        assert_eq!(state.total_available(), 12);
        assert!(state.is_exhausted());
    }

    #[test]
    fn test_session_id_display_and_next() {
        let id = SessionId::default().next().next();
        assert_eq!(id.get(), 2);
        assert_eq!(id.to_string(), "#2");
    }
}
