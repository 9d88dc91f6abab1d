//! Pagination module
//!
//! Every Bitbucket list endpoint answers with a page envelope
//! (`values` + optional `next` URL). This module turns that into item
//! sequences.
//!
//! # Overview
//!
//! - [`PageFetcher`] - one round trip per page ([`HttpPageFetcher`] over a transport)
//! - [`LazyPaginator`] - items on demand, next page only when the buffer is drained
//! - [`CancellablePaginator`] - same, stopping silently once a [`CancellationToken`] fires
//! - [`collect_all`] / [`collect_with_max`] - drain a lazy paginator into a `Vec`

mod cancellable;
mod cancellation;
mod collector;
mod fetcher;
mod lazy;
mod types;

pub use cancellable::CancellablePaginator;
pub use cancellation::CancellationToken;
pub use collector::{collect_all, collect_with_max};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use lazy::LazyPaginator;
pub use types::{ItemStream, Page, PageRequest, PaginatorState};

/// Lazy paginator backed by the HTTP transport
pub type HttpPaginator<T> = LazyPaginator<T, HttpPageFetcher>;

/// Cancellable paginator backed by the HTTP transport
pub type HttpCancellablePaginator<T> = CancellablePaginator<T, HttpPageFetcher>;
