//! Page fetching
//!
//! A [`PageFetcher`] performs exactly one round trip per page. Retries belong
//! to the transport underneath, never to this layer.

use super::types::{Page, PageRequest};
use crate::error::Result;
use crate::http::{RequestConfig, Transport};
use crate::types::Method;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Fetches one page of `T`
#[async_trait]
pub trait PageFetcher<T: Send + 'static>: Send + Sync {
    /// Issue one GET for `request` and parse the page envelope
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>>;
}

#[async_trait]
impl<T, F> PageFetcher<T> for Arc<F>
where
    T: Send + 'static,
    F: PageFetcher<T> + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>> {
        (**self).fetch_page(request).await
    }
}

/// [`PageFetcher`] over a shared [`Transport`]
#[derive(Clone)]
pub struct HttpPageFetcher {
    transport: Arc<dyn Transport>,
}

impl HttpPageFetcher {
    /// Create a fetcher over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl std::fmt::Debug for HttpPageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> PageFetcher<T> for HttpPageFetcher
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<T>> {
        let config = RequestConfig::new().queries(request.query.iter().cloned());
        let body = self
            .transport
            .execute(Method::GET, &request.url, config)
            .await?;
        let page: Page<T> = serde_json::from_str(&body)?;

        debug!(
            url = %request.url,
            items = page.len(),
            has_next = !page.is_terminal(),
            "Fetched page"
        );

        Ok(page)
    }
}
