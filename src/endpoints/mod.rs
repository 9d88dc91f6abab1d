//! Pull request endpoints
//!
//! - [`RepositoriesEndPoint`] - URL layout and paging mode of every call
//! - [`PullRequestsResource`] - pull requests of one repository
//! - [`PullRequestResource`] - one pull request and its sub-resources

mod parameters;
mod pull_request;
mod pull_requests;
mod repositories;
mod slug;

pub use parameters::{
    EnumerateParameters, EnumeratePullRequestsParameters, ListParameters, ListPullRequestsParameters,
};
pub use pull_request::PullRequestResource;
pub use pull_requests::PullRequestsResource;
pub use repositories::RepositoriesEndPoint;
pub use slug::{guid_or_value, to_slug};
