//! Pixabay API response models.

use pixseek_core::{ImageRecord, ResultPage};
use serde::Deserialize;

/// Response body of `GET /api/`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of matches the API will actually page through.
    pub total_hits: u64,
    /// Hits of the requested page.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Individual image hit.
#[derive(Debug, Deserialize)]
pub struct Hit {
    pub id: u64,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub downloads: u64,
}

impl From<Hit> for ImageRecord {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id,
            preview_url: hit.webformat_url,
            full_url: hit.large_image_url,
            tags: hit.tags,
            likes: hit.likes,
            views: hit.views,
            comments: hit.comments,
            downloads: hit.downloads,
        }
    }
}

impl From<SearchResponse> for ResultPage {
    fn from(response: SearchResponse) -> Self {
        let total = usize::try_from(response.total_hits).unwrap_or(usize::MAX);
        Self::new(
            response.hits.into_iter().map(ImageRecord::from).collect(),
            total,
        )
    }
}
