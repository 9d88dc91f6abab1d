//! Pull requests of one repository

use super::parameters::{
    EnumerateParameters, EnumeratePullRequestsParameters, ListParameters, ListPullRequestsParameters,
};
use super::pull_request::PullRequestResource;
use super::repositories::RepositoriesEndPoint;
use crate::error::{Error, Result};
use crate::models::{Activity, PullRequest};
use crate::pagination::{CancellationToken, HttpCancellablePaginator, HttpPaginator};
use std::sync::Arc;

/// `repositories/{account}/{repo_slug}/pullrequests`
///
/// List calls fetch every page and return a `Vec`; enumerate calls return a
/// paginator that fetches pages only as items are consumed. Calls taking an
/// `Option` of parameters fail with [`Error::InvalidArgument`] on `None`
/// before any request is sent.
#[derive(Debug, Clone)]
pub struct PullRequestsResource {
    account: String,
    slug: String,
    endpoint: Arc<RepositoriesEndPoint>,
}

impl PullRequestsResource {
    /// Create a resource for an already normalized account and slug
    ///
    /// Prefer [`RepositoriesEndPoint::pull_requests_resource`], which
    /// normalizes both.
    pub fn new(account: impl Into<String>, slug: impl Into<String>, endpoint: Arc<RepositoriesEndPoint>) -> Self {
        Self {
            account: account.into(),
            slug: slug.into(),
            endpoint,
        }
    }

    /// Normalized account name or GUID
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Repository slug
    pub fn slug(&self) -> &str {
        &self.slug
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// All pull requests matching the server's default filter (open ones)
    pub async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        self.list_pull_requests_with(Some(&ListPullRequestsParameters::default()))
            .await
    }

    /// Pull requests matching `parameters`, across all pages
    pub async fn list_pull_requests_with(
        &self,
        parameters: Option<&ListPullRequestsParameters>,
    ) -> Result<Vec<PullRequest>> {
        let parameters = parameters.ok_or_else(|| Error::missing_argument("parameters"))?;
        self.endpoint
            .list_pull_requests(&self.account, &self.slug, parameters)
            .await
    }

    /// Listing driven by the legacy parameter record
    #[deprecated(note = "use `list_pull_requests_with` with `ListPullRequestsParameters`")]
    pub async fn list_pull_requests_with_list_parameters(
        &self,
        parameters: Option<&ListParameters>,
    ) -> Result<Vec<PullRequest>> {
        let parameters = parameters.ok_or_else(|| Error::missing_argument("parameters"))?;
        self.list_pull_requests_with(Some(&ListPullRequestsParameters::from(parameters)))
            .await
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// Lazy enumeration with default parameters
    pub fn enumerate_pull_requests(&self) -> HttpPaginator<PullRequest> {
        self.endpoint.enumerate_pull_requests(
            &self.account,
            &self.slug,
            &EnumeratePullRequestsParameters::default(),
        )
    }

    /// Lazy enumeration of pull requests matching `parameters`
    pub fn enumerate_pull_requests_with(
        &self,
        parameters: Option<&EnumeratePullRequestsParameters>,
    ) -> Result<HttpPaginator<PullRequest>> {
        let parameters = parameters.ok_or_else(|| Error::missing_argument("parameters"))?;
        Ok(self
            .endpoint
            .enumerate_pull_requests(&self.account, &self.slug, parameters))
    }

    /// Lazy enumeration with default parameters that stops once `token` is cancelled
    pub fn enumerate_pull_requests_cancellable(
        &self,
        token: CancellationToken,
    ) -> HttpCancellablePaginator<PullRequest> {
        self.endpoint.enumerate_pull_requests_cancellable(
            &self.account,
            &self.slug,
            &EnumeratePullRequestsParameters::default(),
            token,
        )
    }

    /// Cancellable enumeration of pull requests matching `parameters`
    pub fn enumerate_pull_requests_cancellable_with(
        &self,
        parameters: Option<&EnumeratePullRequestsParameters>,
        token: CancellationToken,
    ) -> Result<HttpCancellablePaginator<PullRequest>> {
        let parameters = parameters.ok_or_else(|| Error::missing_argument("parameters"))?;
        Ok(self.endpoint.enumerate_pull_requests_cancellable(
            &self.account,
            &self.slug,
            parameters,
            token,
        ))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create a pull request
    pub async fn post_pull_request(&self, pull_request: &PullRequest) -> Result<PullRequest> {
        self.endpoint
            .post_pull_request(&self.account, &self.slug, pull_request)
            .await
    }

    /// Update the pull request identified by `pull_request.id`
    pub async fn put_pull_request(&self, pull_request: &PullRequest) -> Result<PullRequest> {
        self.endpoint
            .put_pull_request(&self.account, &self.slug, pull_request)
            .await
    }

    // ========================================================================
    // Activity log
    // ========================================================================

    /// Whole repository activity log
    #[deprecated(note = "use `get_pull_requests_activities`")]
    pub async fn get_pull_request_log(&self) -> Result<Vec<Activity>> {
        self.get_pull_requests_activities(0).await
    }

    /// Activity of every pull request in the repository, newest first
    ///
    /// `max` of `0` returns everything.
    pub async fn get_pull_requests_activities(&self, max: usize) -> Result<Vec<Activity>> {
        self.endpoint
            .list_pull_requests_activities(&self.account, &self.slug, max)
            .await
    }

    /// Lazily enumerate the repository-wide activity log
    pub fn enumerate_pull_requests_activities(&self, page_len: Option<u32>) -> HttpPaginator<Activity> {
        self.endpoint.enumerate_pull_requests_activities(
            &self.account,
            &self.slug,
            &EnumerateParameters { page_len },
        )
    }

    /// Cancellable enumeration of the repository-wide activity log
    pub fn enumerate_pull_requests_activities_cancellable(
        &self,
        page_len: Option<u32>,
        token: CancellationToken,
    ) -> HttpCancellablePaginator<Activity> {
        self.endpoint.enumerate_pull_requests_activities_cancellable(
            &self.account,
            &self.slug,
            &EnumerateParameters { page_len },
            token,
        )
    }

    /// Operations on a single pull request
    pub fn pull_request_resource(&self, id: u64) -> PullRequestResource {
        PullRequestResource::new(
            self.account.clone(),
            self.slug.clone(),
            id,
            Arc::clone(&self.endpoint),
        )
    }
}
