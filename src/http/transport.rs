//! Transport abstraction
//!
//! Everything above the HTTP layer talks to Bitbucket through [`Transport`],
//! so endpoints and paginators can run against [`HttpClient`] in production
//! and against an in-memory fake in tests.

use super::client::{HttpClient, RequestConfig};
use crate::error::Result;
use crate::types::Method;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One request/response round trip
///
/// Implementations resolve `url` (absolute, or relative to their base URL),
/// return the body of a successful response, and map non-success statuses to
/// [`crate::Error::Remote`] and network failures to [`crate::Error::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and return the raw response body
    async fn execute(&self, method: Method, url: &str, request: RequestConfig) -> Result<String>;
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, method: Method, url: &str, request: RequestConfig) -> Result<String> {
        self.request_text(method.into(), url, request).await
    }
}

/// Perform a request and deserialize the JSON body
pub async fn execute_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    method: Method,
    url: &str,
    request: RequestConfig,
) -> Result<T> {
    let body = transport.execute(method, url, request).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Send `payload` as the JSON body and deserialize the JSON response
pub async fn send_json<B, T>(
    transport: &dyn Transport,
    method: Method,
    url: &str,
    payload: &B,
) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let request = RequestConfig::new().json(serde_json::to_value(payload)?);
    execute_json(transport, method, url, request).await
}

/// Perform a request whose response body is irrelevant (e.g. `204 No Content`)
pub async fn execute_empty(
    transport: &dyn Transport,
    method: Method,
    url: &str,
    request: RequestConfig,
) -> Result<()> {
    transport.execute(method, url, request).await.map(|_| ())
}
