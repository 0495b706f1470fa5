//! Result page types.

use serde::{Deserialize, Serialize};

/// A single image hit returned by the search API.
///
/// The controller never looks inside a record; it only counts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Provider-assigned identifier.
    pub id: u64,
    /// Medium-sized image used as the gallery thumbnail.
    pub preview_url: String,
    /// Full-resolution image opened by the lightbox.
    pub full_url: String,
    /// Comma-separated tags, used as the caption.
    pub tags: String,
    /// Number of likes.
    pub likes: u64,
    /// Number of views.
    pub views: u64,
    /// Number of comments.
    pub comments: u64,
    /// Number of downloads.
    pub downloads: u64,
}

impl ImageRecord {
    /// Creates a record with zeroed statistics.
    #[must_use]
    pub fn new(
        id: u64,
        preview_url: impl Into<String>,
        full_url: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            id,
            preview_url: preview_url.into(),
            full_url: full_url.into(),
            tags: tags.into(),
            likes: 0,
            views: 0,
            comments: 0,
            downloads: 0,
        }
    }

    /// Caption text shown under the image.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.tags
    }
}

/// One batch of records plus the total number of matches for the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultPage {
    /// Records in API order.
    pub items: Vec<ImageRecord>,
    /// Number of matches reachable through the API for this query.
    pub total_available: usize,
}

impl ResultPage {
    /// Creates a page from its records and the reported total.
    #[must_use]
    pub const fn new(items: Vec<ImageRecord>, total_available: usize) -> Self {
        Self {
            items,
            total_available,
        }
    }

    /// A page with no records, used once a query is exhausted.
    #[must_use]
    pub const fn empty(total_available: usize) -> Self {
        Self::new(Vec::new(), total_available)
    }

    /// Number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the page carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
