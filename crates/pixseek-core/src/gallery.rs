//! Gallery session: wires UI events to the controller and the sink.
//!
//! The host application forwards two kinds of events: a submitted search and
//! scroll geometry changes. Everything user-visible that follows from them
//! goes through the [`PresentationSink`].

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::domain::{ResultPage, SearchError, SessionId};
use crate::pagination::{PaginationController, Status};
use crate::ports::{NoticeKind, PresentationSink, ResultSource};
use crate::trigger::{ProximityTrigger, Viewport};

/// Message shown when scrolling past the last result.
pub const END_OF_RESULTS: &str = "We're sorry, but you've reached the end of search results.";

/// What a gallery event led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A page was rendered.
    Rendered {
        /// Records appended to the gallery.
        items: usize,
    },
    /// Nothing left to fetch; the end-of-results notice was shown.
    Exhausted,
    /// Nothing happened (busy, superseded, or the trigger did not fire).
    Ignored,
    /// The query was blank.
    Rejected,
    /// The query matched nothing.
    NoResults,
    /// The result source failed.
    Failed,
}

/// One embedded gallery: controller, sink and the current session's trigger.
pub struct Gallery<S, P> {
    controller: PaginationController<S>,
    sink: P,
    margin: f64,
    trigger: Mutex<Option<ProximityTrigger>>,
    /// Session whose first page matched nothing.
    no_match: Mutex<Option<SessionId>>,
}

impl<S: ResultSource, P: PresentationSink> Gallery<S, P> {
    /// Creates a gallery whose triggers look `margin` units ahead.
    #[must_use]
    pub fn new(controller: PaginationController<S>, sink: P, margin: f64) -> Self {
        Self {
            controller,
            sink,
            margin,
            trigger: Mutex::new(None),
            no_match: Mutex::new(None),
        }
    }

    /// The pagination controller.
    pub const fn controller(&self) -> &PaginationController<S> {
        &self.controller
    }

    /// The presentation sink.
    pub const fn sink(&self) -> &P {
        &self.sink
    }

    /// Session of the currently armed trigger, if any.
    #[must_use]
    pub fn trigger_session(&self) -> Option<SessionId> {
        self.trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|t| t.is_connected())
            .map(ProximityTrigger::session)
    }

    /// Handles a submitted search form.
    ///
    /// Starts a new session, clears the gallery and loads the first page. A
    /// blank query only produces a failure notice; the previous results stay.
    pub async fn on_search_submitted(&self, raw: &str) -> Outcome {
        let session = match self.controller.reset(raw) {
            Ok(session) => session,
            Err(e) => return self.surface(&e),
        };
        self.rearm(session);
        self.sink.clear();
        self.sink.set_loading(false);

        match self.controller.fetch_page().await {
            Ok(page) => self.present_first(&page),
            Err(e) => self.surface(&e),
        }
    }

    /// Handles new scroll geometry from the host.
    pub async fn on_viewport_changed(&self, viewport: Viewport) -> Outcome {
        let fired = {
            let mut slot = self.trigger.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_mut() {
                Some(trigger) if trigger.session() == self.controller.session() => {
                    trigger.observe(viewport)
                }
                Some(trigger) => {
                    debug!("Ignoring geometry for stale trigger {}", trigger.session());
                    false
                }
                None => false,
            }
        };
        if fired {
            self.on_proximity_triggered().await
        } else {
            Outcome::Ignored
        }
    }

    /// Handles the sentinel coming near: loads the next page if any.
    pub async fn on_proximity_triggered(&self) -> Outcome {
        if self.controller.is_busy() {
            debug!("Proximity trigger ignored: fetch in flight");
            return Outcome::Ignored;
        }
        let status = self.controller.status();
        if status == Status::Idle || self.matched_nothing() {
            return Outcome::Ignored;
        }

        match self.controller.fetch_page().await {
            Ok(_) if status == Status::Exhausted => {
                self.sink.notify(NoticeKind::Info, END_OF_RESULTS);
                self.sink.set_loading(false);
                Outcome::Exhausted
            }
            // A retry of a first page that previously failed.
            Ok(page) if status == Status::Ready => self.present_first(&page),
            Ok(page) => {
                self.sink.render_page(&page.items);
                if !self.controller.has_more() {
                    self.sink.set_loading(false);
                }
                Outcome::Rendered { items: page.len() }
            }
            Err(e) => self.surface(&e),
        }
    }

    fn present_first(&self, page: &ResultPage) -> Outcome {
        let total = self
            .controller
            .snapshot()
            .map_or(page.total_available, |state| state.total_available());
        info!("Found {total} images");
        self.sink.report_total(total);
        self.sink
            .notify(NoticeKind::Success, &format!("Hooray! We found {total} images."));
        self.sink.render_page(&page.items);
        self.sink.set_loading(self.controller.has_more());
        Outcome::Rendered { items: page.len() }
    }

    fn surface(&self, error: &SearchError) -> Outcome {
        if error.is_silent() {
            debug!("Swallowed: {error}");
            return Outcome::Ignored;
        }
        self.sink.notify(NoticeKind::Failure, &error.to_string());
        match error {
            SearchError::InvalidQuery => Outcome::Rejected,
            SearchError::EmptyResult { .. } => {
                *self.no_match.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(self.controller.session());
                self.sink.set_loading(false);
                Outcome::NoResults
            }
            _ => Outcome::Failed,
        }
    }

    /// True when the current session's first page came back empty.
    fn matched_nothing(&self) -> bool {
        *self.no_match.lock().unwrap_or_else(PoisonError::into_inner)
            == Some(self.controller.session())
    }

    /// Replaces the trigger with a fresh one for `session`.
    fn rearm(&self, session: SessionId) {
        let mut slot = self.trigger.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut old) = slot.take() {
            old.disconnect();
            debug!("Disconnected trigger for session {}", old.session());
        }
        *slot = Some(ProximityTrigger::new(session, self.margin));
    }
}

impl<S, P> std::fmt::Debug for Gallery<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("controller", &self.controller)
            .field("margin", &self.margin)
            .finish_non_exhaustive()
    }
}
