//! HTTP client for the Pixabay search API.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use pixseek_core::{FetchError, ResultPage, ResultSource};
use reqwest::Client;
use tracing::{debug, warn};

use super::wire::SearchResponse;

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Page sizes accepted by the API.
pub const PER_PAGE_RANGE: RangeInclusive<u32> = 3..=200;

/// Longest response excerpt kept in error messages.
const ERROR_EXCERPT_CHARS: usize = 500;

/// Kind of images to search for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageType {
    /// Any type.
    All,
    /// Photographs only.
    #[default]
    Photo,
    /// Illustrations only.
    Illustration,
    /// Vector graphics only.
    Vector,
}

impl ImageType {
    /// Value sent as the `image_type` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Photo => "photo",
            Self::Illustration => "illustration",
            Self::Vector => "vector",
        }
    }
}

impl FromStr for ImageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "photo" => Ok(Self::Photo),
            "illustration" => Ok(Self::Illustration),
            "vector" => Ok(Self::Vector),
            other => Err(format!(
                "'{other}' is not one of all, photo, illustration, vector"
            )),
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image orientation filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Any orientation.
    All,
    /// Wider than tall.
    #[default]
    Horizontal,
    /// Taller than wide.
    Vertical,
}

impl Orientation {
    /// Value sent as the `orientation` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!(
                "'{other}' is not one of all, horizontal, vertical"
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection and filter settings for [`PixabayClient`].
#[derive(Clone)]
pub struct PixabayConfig {
    /// API key sent as the `key` parameter.
    pub api_key: String,
    /// Search endpoint URL.
    pub endpoint: String,
    /// Image type filter.
    pub image_type: ImageType,
    /// Orientation filter.
    pub orientation: Orientation,
    /// Exclude content unsuitable for all ages.
    pub safesearch: bool,
}

impl PixabayConfig {
    /// Settings with the default endpoint and filters.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            image_type: ImageType::default(),
            orientation: Orientation::default(),
            safesearch: true,
        }
    }
}

impl fmt::Debug for PixabayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixabayConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("image_type", &self.image_type)
            .field("orientation", &self.orientation)
            .field("safesearch", &self.safesearch)
            .finish()
    }
}

/// Pixabay result source.
///
/// Holds nothing but the settings and a shared connection pool; every call
/// is a single independent request.
pub struct PixabayClient {
    client: Client,
    config: PixabayConfig,
}

impl PixabayClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// built.
    pub fn new(config: PixabayConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            anyhow::bail!("A Pixabay API key is required");
        }
        let client = Client::builder()
            .user_agent(concat!("pixseek/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// The active settings.
    #[must_use]
    pub const fn config(&self) -> &PixabayConfig {
        &self.config
    }

    /// Query parameters for one request, key included.
    fn params(&self, query: &str, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.config.api_key.clone()),
            ("q", query.to_owned()),
            ("image_type", self.config.image_type.as_str().to_owned()),
            ("orientation", self.config.orientation.as_str().to_owned()),
            ("safesearch", self.config.safesearch.to_string()),
            ("page", page.to_string()),
            ("per_page", page_size.to_string()),
        ]
    }

    async fn fetch(&self, query: &str, page: u32, page_size: u32) -> Result<ResultPage> {
        if !PER_PAGE_RANGE.contains(&page_size) {
            anyhow::bail!(
                "per_page must be within {}..={}, got {page_size}",
                PER_PAGE_RANGE.start(),
                PER_PAGE_RANGE.end()
            );
        }

        let url = &self.config.endpoint;
        debug!("GET {url} q={query:?} page={page} per_page={page_size}");
        let http_response = self
            .client
            .get(url)
            .query(&self.params(query, page, page_size))
            .send()
            .await
            .with_context(|| format!("Search request to {url} failed"))?;

        let status = http_response.status();
        if !status.is_success() {
            let error_text = http_response.text().await.unwrap_or_default();
            warn!("Pixabay returned HTTP {status}");
            anyhow::bail!(
                "Pixabay API error: HTTP {status}: {}",
                excerpt(&error_text)
            );
        }

        let response_text = http_response
            .text()
            .await
            .context("Failed to read search response")?;
        let response: SearchResponse = serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse search response as JSON: {}",
                excerpt(&response_text)
            )
        })?;

        Ok(response.into())
    }
}

#[async_trait]
impl ResultSource for PixabayClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResultPage, FetchError> {
        self.fetch(query, page, page_size)
            .await
            .map_err(FetchError::from)
    }
}

/// First characters of a response body, trimmed.
fn excerpt(text: &str) -> String {
    text.trim().chars().take(ERROR_EXCERPT_CHARS).collect()
}
