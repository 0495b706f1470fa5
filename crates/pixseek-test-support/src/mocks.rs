//! Mock implementations of core port traits.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use pixseek_core::{
    FetchError, ImageRecord, NoticeKind, PresentationSink, ResultPage, ResultSource,
};
use tokio::sync::Semaphore;

use crate::builders::PageBuilder;

/// A request received by [`MockResultSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    /// Query text as passed by the controller.
    pub query: String,
    /// Requested page (1-based).
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
}

#[derive(Default)]
struct SourceState {
    catalogs: HashMap<String, usize>,
    failures: VecDeque<String>,
    calls: Vec<SearchCall>,
}

/// Mock implementation of `ResultSource` for testing.
///
/// Serves pages cut from per-query synthetic catalogs. Unknown queries match
/// nothing. Clones share state, so a test can keep a handle after moving the
/// source into a controller.
///
/// A gated source holds every response until [`release`](Self::release) is
/// called, which lets a test interleave events with an outstanding fetch.
#[derive(Clone, Default)]
pub struct MockResultSource {
    state: Arc<Mutex<SourceState>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockResultSource {
    /// Creates a source with no catalogs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source whose responses wait for [`release`](Self::release).
    #[must_use]
    pub fn gated() -> Self {
        Self {
            state: Arc::default(),
            gate: Some(Arc::new(Semaphore::new(0))),
        }
    }

    /// Registers a catalog of `total` records for `query`.
    #[must_use]
    pub fn with_catalog(self, query: &str, total: usize) -> Self {
        self.lock().catalogs.insert(query.to_owned(), total);
        self
    }

    /// Makes the next request fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.lock().failures.push_back(message.to_owned());
    }

    /// Lets `n` held responses through.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<SearchCall> {
        self.lock().calls.clone()
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SourceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResultSource for MockResultSource {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResultPage, FetchError> {
        self.lock().calls.push(SearchCall {
            query: query.to_owned(),
            page,
            page_size,
        });

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let mut state = self.lock();
        if let Some(message) = state.failures.pop_front() {
            return Err(FetchError::msg(message));
        }
        let total = state.catalogs.get(query).copied().unwrap_or(0);
        Ok(PageBuilder::slice(query, page, page_size, total))
    }
}

/// A call received by [`MockPresentationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// `clear()`
    Cleared,
    /// `render_page()` with these records.
    Rendered(Vec<ImageRecord>),
    /// `report_total()`
    Total(usize),
    /// `notify()`
    Notice(NoticeKind, String),
    /// `set_loading()`
    Loading(bool),
}

/// Mock implementation of `PresentationSink` for testing.
///
/// Captures every call for later assertions.
#[derive(Clone, Default)]
pub struct MockPresentationSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl MockPresentationSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records currently shown: everything rendered since the last clear.
    #[must_use]
    pub fn gallery(&self) -> Vec<ImageRecord> {
        let mut shown = Vec::new();
        for event in self.events() {
            match event {
                SinkEvent::Cleared => shown.clear(),
                SinkEvent::Rendered(items) => shown.extend(items),
                _ => {}
            }
        }
        shown
    }

    /// Returns every reported total, in order.
    #[must_use]
    pub fn totals(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Total(total) => Some(total),
                _ => None,
            })
            .collect()
    }

    /// Returns the messages of all notices of `kind`.
    #[must_use]
    pub fn notices(&self, kind: NoticeKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Notice(k, message) if k == kind => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of `render_page` calls.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Rendered(_)))
            .count()
    }

    /// Returns the last loading indicator state, if it was ever set.
    #[must_use]
    pub fn loading(&self) -> Option<bool> {
        self.events().iter().rev().find_map(|e| match e {
            SinkEvent::Loading(visible) => Some(*visible),
            _ => None,
        })
    }

    fn push(&self, event: SinkEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl PresentationSink for MockPresentationSink {
    fn clear(&self) {
        self.push(SinkEvent::Cleared);
    }

    fn render_page(&self, items: &[ImageRecord]) {
        self.push(SinkEvent::Rendered(items.to_vec()));
    }

    fn report_total(&self, total: usize) {
        self.push(SinkEvent::Total(total));
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        self.push(SinkEvent::Notice(kind, message.to_owned()));
    }

    fn set_loading(&self, visible: bool) {
        self.push(SinkEvent::Loading(visible));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_serves_catalog_pages() {
        let source = MockResultSource::new().with_catalog("cats", 30);
        let page = source.search("cats", 3, 12).await.unwrap();
        assert_eq!(page.len(), 6);
        assert_eq!(page.total_available, 30);
        assert_eq!(
            source.calls(),
            vec![SearchCall {
                query: "cats".into(),
                page: 3,
                page_size: 12
            }]
        );
    }

    #[tokio::test]
    async fn test_mock_source_unknown_query_is_empty() {
        let source = MockResultSource::new();
        let page = source.search("zzzznotfound", 1, 12).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_available, 0);
    }

    #[tokio::test]
    async fn test_mock_source_scripted_failure() {
        let source = MockResultSource::new().with_catalog("cats", 30);
        source.fail_next("HTTP 500");
        let err = source.search("cats", 1, 12).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
        assert!(source.search("cats", 1, 12).await.is_ok());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_gated_source_waits_for_release() {
        let source = MockResultSource::gated().with_catalog("cats", 30);
        let handle = source.clone();
        let (page, ()) = tokio::join!(source.search("cats", 1, 12), async move {
            assert_eq!(handle.call_count(), 1);
            handle.release(1);
        });
        assert_eq!(page.unwrap().len(), 12);
    }

    #[test]
    fn test_mock_sink_tracks_gallery() {
        let sink = MockPresentationSink::new();
        let first = PageBuilder::with_len("cats", 2, 2);
        sink.render_page(&first.items);
        sink.clear();
        sink.render_page(&first.items[..1]);
        sink.report_total(2);
        sink.notify(NoticeKind::Info, "end");
        sink.set_loading(true);

        assert_eq!(sink.gallery().len(), 1);
        assert_eq!(sink.render_count(), 2);
        assert_eq!(sink.totals(), vec![2]);
        assert_eq!(sink.notices(NoticeKind::Info), vec!["end".to_string()]);
        assert_eq!(sink.loading(), Some(true));
    }
}
