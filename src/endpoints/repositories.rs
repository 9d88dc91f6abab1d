//! Repository-scoped pull request operations
//!
//! [`RepositoriesEndPoint`] owns the URL layout and picks the paging mode for
//! every call. The resource facades only validate arguments and forward here.

use super::parameters::{EnumerateParameters, EnumeratePullRequestsParameters, ListPullRequestsParameters};
use super::pull_requests::PullRequestsResource;
use super::slug::{guid_or_value, to_slug};
use crate::error::{Error, Result};
use crate::http::{execute_empty, execute_json, send_json, RequestConfig, Transport};
use crate::models::{Activity, Comment, MergeParameters, Participant, PullRequest};
use crate::pagination::{
    collect_with_max, CancellationToken, HttpCancellablePaginator, HttpPageFetcher, HttpPaginator,
    LazyPaginator, PageRequest,
};
use crate::types::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Entry point for everything under `repositories/{account}/{repo_slug}`
#[derive(Clone)]
pub struct RepositoriesEndPoint {
    transport: Arc<dyn Transport>,
}

impl RepositoriesEndPoint {
    /// Create an endpoint over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Transport shared by every call
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Pull requests of one repository
    ///
    /// `account` may be an account name or a GUID (with or without braces);
    /// `repo_slug_or_name` may be a slug or a display name.
    pub fn pull_requests_resource(
        self: &Arc<Self>,
        account: &str,
        repo_slug_or_name: &str,
    ) -> PullRequestsResource {
        PullRequestsResource::new(
            guid_or_value(account),
            to_slug(repo_slug_or_name),
            Arc::clone(self),
        )
    }

    // ========================================================================
    // Pull request collection
    // ========================================================================

    /// Every pull request matching `parameters`, across all pages
    pub async fn list_pull_requests(
        &self,
        account: &str,
        slug: &str,
        params: &ListPullRequestsParameters,
    ) -> Result<Vec<PullRequest>> {
        let request = PageRequest::new(pull_requests_path(account, slug))
            .with_query(params.to_query_params());
        self.collect(request, params.max).await
    }

    /// Lazily enumerate pull requests matching `parameters`
    pub fn enumerate_pull_requests(
        &self,
        account: &str,
        slug: &str,
        params: &EnumeratePullRequestsParameters,
    ) -> HttpPaginator<PullRequest> {
        self.paginate(
            PageRequest::new(pull_requests_path(account, slug))
                .with_query(params.to_query_params()),
        )
    }

    /// Lazy enumeration that stops once `token` is cancelled
    pub fn enumerate_pull_requests_cancellable(
        &self,
        account: &str,
        slug: &str,
        params: &EnumeratePullRequestsParameters,
        token: CancellationToken,
    ) -> HttpCancellablePaginator<PullRequest> {
        self.enumerate_pull_requests(account, slug, params)
            .cancellable(token)
    }

    /// Create a pull request
    pub async fn post_pull_request(
        &self,
        account: &str,
        slug: &str,
        pull_request: &PullRequest,
    ) -> Result<PullRequest> {
        send_json(
            self.transport.as_ref(),
            Method::POST,
            &pull_requests_path(account, slug),
            pull_request,
        )
        .await
    }

    /// Update a pull request; `pull_request.id` selects which one
    pub async fn put_pull_request(
        &self,
        account: &str,
        slug: &str,
        pull_request: &PullRequest,
    ) -> Result<PullRequest> {
        let id = pull_request
            .id
            .ok_or_else(|| Error::missing_argument("pull_request.id"))?;
        send_json(
            self.transport.as_ref(),
            Method::PUT,
            &pull_request_path(account, slug, id),
            pull_request,
        )
        .await
    }

    /// Repository-wide activity log; `max` of `0` returns everything
    pub async fn list_pull_requests_activities(
        &self,
        account: &str,
        slug: &str,
        max: usize,
    ) -> Result<Vec<Activity>> {
        let request = PageRequest::new(format!("{}/activity", pull_requests_path(account, slug)));
        self.collect(request, max).await
    }

    /// Lazily enumerate the repository-wide activity log
    pub fn enumerate_pull_requests_activities(
        &self,
        account: &str,
        slug: &str,
        params: &EnumerateParameters,
    ) -> HttpPaginator<Activity> {
        self.paginate(
            PageRequest::new(format!("{}/activity", pull_requests_path(account, slug)))
                .with_query(params.to_query_params()),
        )
    }

    /// Cancellable enumeration of the repository-wide activity log
    pub fn enumerate_pull_requests_activities_cancellable(
        &self,
        account: &str,
        slug: &str,
        params: &EnumerateParameters,
        token: CancellationToken,
    ) -> HttpCancellablePaginator<Activity> {
        self.enumerate_pull_requests_activities(account, slug, params)
            .cancellable(token)
    }

    // ========================================================================
    // Single pull request
    // ========================================================================

    /// Fetch one pull request
    pub async fn get_pull_request(&self, account: &str, slug: &str, id: u64) -> Result<PullRequest> {
        self.get_json(&pull_request_path(account, slug, id)).await
    }

    /// Unified diff as returned by the server
    pub async fn get_pull_request_diff(&self, account: &str, slug: &str, id: u64) -> Result<String> {
        self.get_text(&format!("{}/diff", pull_request_path(account, slug, id)))
            .await
    }

    /// Patch series as returned by the server
    pub async fn get_pull_request_patch(&self, account: &str, slug: &str, id: u64) -> Result<String> {
        self.get_text(&format!("{}/patch", pull_request_path(account, slug, id)))
            .await
    }

    /// Activity log of one pull request
    pub async fn list_pull_request_activities(
        &self,
        account: &str,
        slug: &str,
        id: u64,
        max: usize,
    ) -> Result<Vec<Activity>> {
        let request = PageRequest::new(format!("{}/activity", pull_request_path(account, slug, id)));
        self.collect(request, max).await
    }

    /// Lazily enumerate the activity log of one pull request
    pub fn enumerate_pull_request_activities(
        &self,
        account: &str,
        slug: &str,
        id: u64,
        params: &EnumerateParameters,
    ) -> HttpPaginator<Activity> {
        self.paginate(
            PageRequest::new(format!("{}/activity", pull_request_path(account, slug, id)))
                .with_query(params.to_query_params()),
        )
    }

    /// Comments on one pull request
    pub async fn list_pull_request_comments(
        &self,
        account: &str,
        slug: &str,
        id: u64,
        max: usize,
    ) -> Result<Vec<Comment>> {
        let request = PageRequest::new(format!("{}/comments", pull_request_path(account, slug, id)));
        self.collect(request, max).await
    }

    /// Lazily enumerate the comments on one pull request
    pub fn enumerate_pull_request_comments(
        &self,
        account: &str,
        slug: &str,
        id: u64,
        params: &EnumerateParameters,
    ) -> HttpPaginator<Comment> {
        self.paginate(
            PageRequest::new(format!("{}/comments", pull_request_path(account, slug, id)))
                .with_query(params.to_query_params()),
        )
    }

    /// Fetch one comment
    pub async fn get_pull_request_comment(
        &self,
        account: &str,
        slug: &str,
        id: u64,
        comment_id: u64,
    ) -> Result<Comment> {
        self.get_json(&format!(
            "{}/comments/{comment_id}",
            pull_request_path(account, slug, id)
        ))
        .await
    }

    /// Approve as the authenticated user; returns the resulting participant
    pub async fn approve_pull_request(&self, account: &str, slug: &str, id: u64) -> Result<Participant> {
        execute_json(
            self.transport.as_ref(),
            Method::POST,
            &format!("{}/approve", pull_request_path(account, slug, id)),
            RequestConfig::new(),
        )
        .await
    }

    /// Withdraw the authenticated user's approval
    pub async fn remove_pull_request_approval(&self, account: &str, slug: &str, id: u64) -> Result<()> {
        execute_empty(
            self.transport.as_ref(),
            Method::DELETE,
            &format!("{}/approve", pull_request_path(account, slug, id)),
            RequestConfig::new(),
        )
        .await
    }

    /// Decline a pull request
    pub async fn decline_pull_request(&self, account: &str, slug: &str, id: u64) -> Result<PullRequest> {
        execute_json(
            self.transport.as_ref(),
            Method::POST,
            &format!("{}/decline", pull_request_path(account, slug, id)),
            RequestConfig::new(),
        )
        .await
    }

    /// Merge; without parameters the server's defaults apply
    pub async fn accept_and_merge_pull_request(
        &self,
        account: &str,
        slug: &str,
        id: u64,
        params: Option<&MergeParameters>,
    ) -> Result<PullRequest> {
        let url = format!("{}/merge", pull_request_path(account, slug, id));
        match params {
            Some(params) => send_json(self.transport.as_ref(), Method::POST, &url, params).await,
            None => execute_json(self.transport.as_ref(), Method::POST, &url, RequestConfig::new()).await,
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn paginate<T>(&self, request: PageRequest) -> HttpPaginator<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        LazyPaginator::new(HttpPageFetcher::new(Arc::clone(&self.transport)), request)
    }

    async fn collect<T>(&self, request: PageRequest, max: usize) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        debug!(url = %request.url, max, "Listing");
        collect_with_max(self.paginate(request), max).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        execute_json(self.transport.as_ref(), Method::GET, url, RequestConfig::new()).await
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        self.transport
            .execute(Method::GET, url, RequestConfig::new())
            .await
    }
}

impl std::fmt::Debug for RepositoriesEndPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoriesEndPoint").finish_non_exhaustive()
    }
}

fn pull_requests_path(account: &str, slug: &str) -> String {
    format!("repositories/{account}/{slug}/pullrequests")
}

fn pull_request_path(account: &str, slug: &str, id: u64) -> String {
    format!("{}/{id}", pull_requests_path(account, slug))
}
