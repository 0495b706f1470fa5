//! Presentation port for rendering the gallery and user notices.

use serde::Serialize;

use crate::domain::ImageRecord;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Something worked (e.g. matches were found).
    Success,
    /// A search could not be completed.
    Failure,
    /// Informational, such as reaching the end of results.
    Info,
}

/// Port for whatever displays the gallery.
pub trait PresentationSink: Send + Sync {
    /// Removes every rendered record; called when a new search starts.
    fn clear(&self);

    /// Appends a page of records to the gallery.
    fn render_page(&self, items: &[ImageRecord]);

    /// Shows the total number of matches for the current search.
    fn report_total(&self, total: usize);

    /// Surfaces a notice to the user.
    fn notify(&self, kind: NoticeKind, message: &str);

    /// Shows or hides the "more results loading" indicator.
    fn set_loading(&self, _visible: bool) {}
}

impl<T: PresentationSink + ?Sized> PresentationSink for Box<T> {
    fn clear(&self) {
        (**self).clear();
    }

    fn render_page(&self, items: &[ImageRecord]) {
        (**self).render_page(items);
    }

    fn report_total(&self, total: usize) {
        (**self).report_total(total);
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        (**self).notify(kind, message);
    }

    fn set_loading(&self, visible: bool) {
        (**self).set_loading(visible);
    }
}
