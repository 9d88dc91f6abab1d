//! HTTP client module
//!
//! Provides the HTTP layer the SDK talks to Bitbucket through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Integration with auth module
//! - **Transport seam**: [`Transport`] decouples endpoints from reqwest

mod client;
mod rate_limit;
mod transport;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{execute_empty, execute_json, send_json, Transport};

#[cfg(test)]
mod tests;
