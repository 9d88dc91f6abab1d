// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Bitbucket SDK
//!
//! Typed, async access to Bitbucket Cloud pull requests and their activity
//! logs.
//!
//! ## Features
//!
//! - **Eager listing**: `list_*` calls follow every page and return a `Vec`
//! - **Lazy enumeration**: `enumerate_*` calls fetch a page only when its items are needed
//! - **Cancellation**: `*_cancellable` variants stop at the next page or item boundary
//! - **Auth**: app passwords, access tokens, OAuth2 consumers
//! - **Resilient HTTP**: retries with backoff, client-side rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bitbucket_sdk::{BitbucketClient, EnumeratePullRequestsParameters, PullRequestState, SdkConfig};
//!
//! #[tokio::main]
//! async fn main() -> bitbucket_sdk::Result<()> {
//!     let config = SdkConfig::from_file("bitbucket.yaml")?;
//!     let client = BitbucketClient::new(&config)?;
//!     let prs = client.pull_requests("my-team", "my-repo");
//!
//!     // Everything at once
//!     let open = prs.list_pull_requests().await?;
//!
//!     // Page by page
//!     let params = EnumeratePullRequestsParameters::default()
//!         .with_page_len(50)
//!         .with_states([PullRequestState::Merged]);
//!     let mut merged = prs.enumerate_pull_requests_with(Some(&params))?;
//!     while let Some(pr) = merged.next_item().await {
//!         println!("{}", pr?.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  BitbucketClient → PullRequestsResource → PullRequestResource   │
//! │                 (validate params, build query)                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────┬───────────┴───────────┬──────────────────────┐
//! │   Eager          │   Lazy                │   Cancellable        │
//! │   collect_all    │   LazyPaginator       │   CancellablePaginator│
//! └──────────────────┴───────────┬───────────┴──────────────────────┘
//!                                │  one GET per page
//! ┌──────────┬───────────────────┴───────────┬──────────────────────┐
//! │   Auth   │   HTTP (Transport)            │   Errors             │
//! ├──────────┼───────────────────────────────┼──────────────────────┤
//! │ Basic    │ Retry / Backoff               │ InvalidArgument      │
//! │ Bearer   │ Rate Limit                    │ Remote { status }    │
//! │ OAuth2   │ Status mapping                │ Transport            │
//! └──────────┴───────────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page fetching, lazy and cancellable enumeration
pub mod pagination;

/// Resource payloads
pub mod models;

/// Pull request endpoints
pub mod endpoints;

/// YAML configuration
pub mod config;

/// Top-level client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::AuthConfig;
pub use client::BitbucketClient;
pub use config::SdkConfig;
pub use endpoints::{
    EnumerateParameters, EnumeratePullRequestsParameters, ListParameters,
    ListPullRequestsParameters, PullRequestResource, PullRequestsResource, RepositoriesEndPoint,
};
pub use models::{Activity, ActivityKind, Comment, MergeParameters, PullRequest, PullRequestState};
pub use pagination::{
    collect_all, collect_with_max, CancellablePaginator, CancellationToken, LazyPaginator,
    PaginatorState,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
