//! Auth configuration types
//!
//! These types describe how requests to Bitbucket are authenticated and
//! hold tokens obtained from the OAuth2 token endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default Bitbucket Cloud OAuth2 token endpoint
pub const BITBUCKET_TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";

fn default_token_url() -> String {
    BITBUCKET_TOKEN_URL.to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication (public repositories only)
    #[default]
    None,

    /// HTTP Basic authentication (username + app password)
    Basic {
        /// Username
        username: String,
        /// App password
        password: String,
    },

    /// Bearer token authentication (repository/workspace access tokens)
    Bearer {
        /// The bearer token
        token: String,
    },

    /// OAuth2 Client Credentials flow (OAuth consumer key + secret)
    Oauth2ClientCredentials {
        /// Token endpoint URL
        #[serde(default = "default_token_url")]
        token_url: String,
        /// Consumer key
        client_id: String,
        /// Consumer secret
        client_secret: String,
        /// Requested scopes
        #[serde(default)]
        scopes: Vec<String>,
    },

    /// OAuth2 Refresh Token flow
    Oauth2Refresh {
        /// Token endpoint URL
        #[serde(default = "default_token_url")]
        token_url: String,
        /// Consumer key
        client_id: String,
        /// Consumer secret
        client_secret: String,
        /// Refresh token
        refresh_token: String,
    },
}

impl AuthConfig {
    /// Basic auth with an app password
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer auth with an access token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Client credentials against the default Bitbucket token endpoint
    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::Oauth2ClientCredentials {
            token_url: default_token_url(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: Vec::new(),
        }
    }

    /// Whether this auth type obtains tokens from a token endpoint
    pub fn uses_token_endpoint(&self) -> bool {
        matches!(
            self,
            Self::Oauth2ClientCredentials { .. } | Self::Oauth2Refresh { .. }
        )
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}
