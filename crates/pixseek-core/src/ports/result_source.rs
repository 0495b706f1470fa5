//! Result source port for querying a remote image search API.

use async_trait::async_trait;

use crate::domain::{FetchError, ResultPage};

/// Port for fetching one page of search results.
///
/// Implementations must be stateless with respect to the pagination: the
/// same arguments always describe the same request.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Fetches `page` (1-based) of `query`, `page_size` records per page.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport or decode failure.
    async fn search(&self, query: &str, page: u32, page_size: u32)
        -> Result<ResultPage, FetchError>;
}

#[async_trait]
impl<T: ResultSource + ?Sized> ResultSource for std::sync::Arc<T> {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResultPage, FetchError> {
        (**self).search(query, page, page_size).await
    }
}
