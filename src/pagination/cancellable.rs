//! Enumeration that can be abandoned part way through

use super::cancellation::CancellationToken;
use super::fetcher::PageFetcher;
use super::lazy::LazyPaginator;
use super::types::{ItemStream, PaginatorState};
use crate::error::Result;

/// [`LazyPaginator`] that stops when its [`CancellationToken`] fires
///
/// The token is checked right before a page is requested and right before a
/// buffered item is handed out. A triggered token ends the sequence with
/// `None`, not an error, and no further page is ever fetched.
pub struct CancellablePaginator<T, F> {
    inner: LazyPaginator<T, F>,
    token: CancellationToken,
}

impl<T, F> CancellablePaginator<T, F>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    /// Wrap `inner` so that it observes `token`
    pub fn new(inner: LazyPaginator<T, F>, token: CancellationToken) -> Self {
        Self { inner, token }
    }

    /// Next item, or `None` once the sequence has ended or was cancelled
    pub async fn next_item(&mut self) -> Option<Result<T>> {
        self.inner.advance(Some(&self.token)).await
    }

    /// Drive the paginator as a [`Stream`](futures::Stream)
    pub fn into_stream(self) -> ItemStream<T>
    where
        F: 'static,
    {
        Box::pin(futures::stream::unfold(self, |mut paginator| async move {
            paginator
                .next_item()
                .await
                .map(|item| (item, paginator))
        }))
    }

    /// Token observed by this paginator
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Current state
    pub fn state(&self) -> PaginatorState {
        self.inner.state()
    }

    /// Pages successfully fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.inner.pages_fetched()
    }

    /// Items handed out so far
    pub fn items_yielded(&self) -> usize {
        self.inner.items_yielded()
    }
}

impl<T, F> std::fmt::Debug for CancellablePaginator<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellablePaginator")
            .field("inner", &self.inner)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
