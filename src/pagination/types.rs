//! Pagination types
//!
//! Defines the page envelope returned by Bitbucket list endpoints and the
//! request that fetches one page.

use crate::error::Result;
use crate::types::QueryParams;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Boxed stream of enumerated items
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// One page of a Bitbucket list response
///
/// ```json
/// { "pagelen": 10, "size": 25, "page": 1, "next": "https://...?page=2", "values": [ ... ] }
/// ```
///
/// Only `values` and `next` drive pagination; the rest is informational and
/// often omitted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in server order
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    /// Continuation URL; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Link to the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Requested page length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,
    /// Total number of items across all pages, when the server counts them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl<T> Page<T> {
    /// Create a page with an optional continuation
    pub fn new(values: Vec<T>, next: Option<String>) -> Self {
        Self {
            values,
            next,
            previous: None,
            pagelen: None,
            size: None,
            page: None,
        }
    }

    /// Create the last page of a sequence
    pub fn terminal(values: Vec<T>) -> Self {
        Self::new(values, None)
    }

    /// Continuation URL, treating an empty string as absent
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Whether this page ends the sequence
    pub fn is_terminal(&self) -> bool {
        self.next_url().is_none()
    }

    /// Request for the following page, if any
    pub fn next_request(&self) -> Option<PageRequest> {
        self.next_url().map(PageRequest::new)
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this page carries no items (it may still have a continuation)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Request for a single page
///
/// The first request of an enumeration carries the caller's query
/// parameters. Continuation requests use the server's `next` URL verbatim,
/// which already encodes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Absolute URL, or a path relative to the transport's base URL
    pub url: String,
    /// Query parameters, in order
    pub query: QueryParams,
}

impl PageRequest {
    /// Create a request with no query parameters
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    /// Set the query parameters
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Append one query parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Where an enumeration stands
///
/// ```text
///   Fetching ──page──▶ Yielding ──buffer drained, next──▶ Fetching
///      │                  │ └──buffer drained, no next──▶ Exhausted
///      │                  └──token──▶ Cancelled
///      ├──token──▶ Cancelled
///      └──error──▶ Exhausted
/// ```
///
/// Cancellation is only observed on entry to `Fetching` and `Yielding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    /// The next page has to be requested before anything can be yielded
    Fetching,
    /// Items from the current page are buffered
    Yielding,
    /// Stopped by a cancellation token
    Cancelled,
    /// No further items; terminal
    Exhausted,
}

impl PaginatorState {
    /// Whether the enumeration has ended
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Cancelled | Self::Exhausted)
    }
}
