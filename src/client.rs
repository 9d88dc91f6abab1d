//! Top-level client

use crate::config::SdkConfig;
use crate::endpoints::{PullRequestsResource, RepositoriesEndPoint};
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use std::sync::Arc;
use tracing::info;

/// Entry point of the SDK
///
/// Cheap to clone; clones share the HTTP connection pool, rate limiter and
/// OAuth2 token cache.
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    repositories: Arc<RepositoriesEndPoint>,
}

impl BitbucketClient {
    /// Build the HTTP layer described by `config`
    pub fn new(config: &SdkConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_client_config(), config.auth_config())?;

        info!(
            base_url = %config.base_url,
            authenticated = http.has_authenticator(),
            rate_limited = http.has_rate_limiter(),
            "Created Bitbucket client"
        );

        Ok(Self::with_transport(Arc::new(http)))
    }

    /// Default configuration with `BITBUCKET_*` environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = SdkConfig::default();
        config.apply_env_overrides();
        Self::new(&config)
    }

    /// Use an already built transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            repositories: Arc::new(RepositoriesEndPoint::new(transport)),
        }
    }

    /// `repositories` endpoint
    pub fn repositories(&self) -> &Arc<RepositoriesEndPoint> {
        &self.repositories
    }

    /// Pull requests of `account/repo_slug_or_name`
    pub fn pull_requests(&self, account: &str, repo_slug_or_name: &str) -> PullRequestsResource {
        self.repositories
            .pull_requests_resource(account, repo_slug_or_name)
    }
}
