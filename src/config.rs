//! SDK configuration
//!
//! Loaded from YAML, optionally overridden from the environment, then turned
//! into the HTTP and auth configuration the client is built from.
//!
//! ```yaml
//! base_url: https://api.bitbucket.org/2.0
//! timeout_seconds: 30
//! max_retries: 3
//! backoff:
//!   type: exponential
//!   initial_ms: 100
//!   max_ms: 60000
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 10
//! auth:
//!   type: basic
//!   username: sam
//!   password: app-password
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Overrides `base_url`
pub const ENV_BASE_URL: &str = "BITBUCKET_BASE_URL";
/// Together with [`ENV_APP_PASSWORD`], switches to basic auth
pub const ENV_USERNAME: &str = "BITBUCKET_USERNAME";
pub const ENV_APP_PASSWORD: &str = "BITBUCKET_APP_PASSWORD";
/// Switches to bearer auth; wins over username and app password
pub const ENV_ACCESS_TOKEN: &str = "BITBUCKET_ACCESS_TOKEN";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete SDK configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Root of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries for 429, 5xx and network failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Client-side throttling; absent disables it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Custom user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffConfig::default(),
            rate_limit: None,
            user_agent: None,
            auth: AuthConfig::None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

impl SdkConfig {
    /// Parse a YAML document and validate it
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration");
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                base.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }
        if self.backoff.initial_ms > self.backoff.max_ms {
            return Err(Error::config("backoff.initial_ms must not exceed backoff.max_ms"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::config(
                    "rate_limit.requests_per_second must be greater than 0",
                ));
            }
        }
        match &self.auth {
            AuthConfig::Basic { username, .. } if username.is_empty() => {
                Err(Error::config("auth.username must not be empty"))
            }
            AuthConfig::Bearer { token } if token.is_empty() => {
                Err(Error::config("auth.token must not be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Apply `BITBUCKET_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.auth = AuthConfig::bearer(token);
        } else if let (Some(username), Some(password)) =
            (lookup(ENV_USERNAME), lookup(ENV_APP_PASSWORD))
        {
            self.auth = AuthConfig::basic(username, password);
        }
    }

    /// HTTP layer configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff.backoff_type,
                Duration::from_millis(self.backoff.initial_ms),
                Duration::from_millis(self.backoff.max_ms),
            );

        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }

    /// Authentication configuration
    pub fn auth_config(&self) -> AuthConfig {
        self.auth.clone()
    }
}
