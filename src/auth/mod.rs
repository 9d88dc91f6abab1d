//! Authentication module
//!
//! Supports: Basic (app passwords), Bearer (access tokens), OAuth2 client
//! credentials and refresh tokens.
//!
//! The `Authenticator` applies the configured scheme to each request and
//! caches OAuth2 tokens until shortly before they expire.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, BITBUCKET_TOKEN_URL};
