//! Lazy, page-by-page enumeration

use super::cancellable::CancellablePaginator;
use super::cancellation::CancellationToken;
use super::fetcher::PageFetcher;
use super::types::{ItemStream, PageRequest, PaginatorState};
use crate::error::Result;
use std::collections::VecDeque;
use std::marker::PhantomData;
use tracing::debug;

/// Forward-only sequence of items spread over pages
///
/// Nothing is fetched until the first item is requested. Buffered items are
/// handed out without touching the network; the next page is requested only
/// once the buffer is drained and the current page had a continuation. An
/// empty page with a continuation is followed, not treated as the end.
///
/// The sequence is not restartable: build a new paginator from the original
/// request for a second pass. A fetch error is yielded once and ends the
/// sequence; items already yielded stay yielded.
pub struct LazyPaginator<T, F> {
    fetcher: F,
    next_request: Option<PageRequest>,
    buffer: VecDeque<T>,
    state: PaginatorState,
    pages_fetched: usize,
    items_yielded: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T, F> LazyPaginator<T, F>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    /// Create a paginator starting at `first`
    pub fn new(fetcher: F, first: PageRequest) -> Self {
        Self {
            fetcher,
            next_request: Some(first),
            buffer: VecDeque::new(),
            state: PaginatorState::Fetching,
            pages_fetched: 0,
            items_yielded: 0,
            _item: PhantomData,
        }
    }

    /// Next item, or `None` once the sequence has ended
    pub async fn next_item(&mut self) -> Option<Result<T>> {
        self.advance(None).await
    }

    /// Make this enumeration stop when `token` is triggered
    pub fn cancellable(self, token: CancellationToken) -> CancellablePaginator<T, F> {
        CancellablePaginator::new(self, token)
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

    /// Current state
    pub fn state(&self) -> PaginatorState {
        self.state
    }

    /// Pages successfully fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Items handed out so far
    pub fn items_yielded(&self) -> usize {
        self.items_yielded
    }

    /// Shared state machine for the lazy and cancellable variants.
    ///
    /// `token` is polled on entry to `Fetching` and `Yielding` only.
    pub(crate) async fn advance(&mut self, token: Option<&CancellationToken>) -> Option<Result<T>> {
        loop {
            match self.state {
                PaginatorState::Cancelled | PaginatorState::Exhausted => return None,

                PaginatorState::Yielding => {
                    if is_cancelled(token) {
                        self.cancel();
                        return None;
                    }
                    if let Some(item) = self.buffer.pop_front() {
                        self.items_yielded += 1;
                        return Some(Ok(item));
                    }
                    self.state = if self.next_request.is_some() {
                        PaginatorState::Fetching
                    } else {
                        debug!(
                            pages = self.pages_fetched,
                            items = self.items_yielded,
                            "Enumeration exhausted"
                        );
                        PaginatorState::Exhausted
                    };
                }

                PaginatorState::Fetching => {
                    if is_cancelled(token) {
                        self.cancel();
                        return None;
                    }
                    let Some(request) = self.next_request.take() else {
                        self.state = PaginatorState::Exhausted;
                        continue;
                    };
                    match self.fetcher.fetch_page(&request).await {
                        Ok(page) => {
                            self.pages_fetched += 1;
                            self.next_request = page.next_request();
                            self.buffer.extend(page.values);
                            self.state = PaginatorState::Yielding;
                        }
                        Err(e) => {
                            debug!(url = %request.url, error = %e, "Page fetch failed");
                            self.state = PaginatorState::Exhausted;
                            return Some(Err(e));
                        }
                    }
                }
            }
        }
    }

    fn cancel(&mut self) {
        debug!(
            pages = self.pages_fetched,
            items = self.items_yielded,
            "Enumeration cancelled"
        );
        self.buffer.clear();
        self.next_request = None;
        self.state = PaginatorState::Cancelled;
    }
}

fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.is_some_and(CancellationToken::is_cancelled)
}

impl<T, F> std::fmt::Debug for LazyPaginator<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyPaginator")
            .field("state", &self.state)
            .field("next_request", &self.next_request)
            .field("buffered", &self.buffer.len())
            .field("pages_fetched", &self.pages_fetched)
            .field("items_yielded", &self.items_yielded)
            .finish_non_exhaustive()
    }
}
