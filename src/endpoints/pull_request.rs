//! Operations on one pull request
//!
//! Bitbucket has no resource for a single pull request as such; this is a
//! client-side handle bundling the identifiers its sub-resources need.

use super::parameters::EnumerateParameters;
use super::repositories::RepositoriesEndPoint;
use crate::error::Result;
use crate::models::{Activity, Comment, MergeParameters, Participant, PullRequest};
use crate::pagination::{CancellationToken, HttpCancellablePaginator, HttpPaginator};
use std::sync::Arc;

/// `repositories/{account}/{repo_slug}/pullrequests/{id}`
#[derive(Debug, Clone)]
pub struct PullRequestResource {
    account: String,
    slug: String,
    id: u64,
    endpoint: Arc<RepositoriesEndPoint>,
}

impl PullRequestResource {
    /// Create a resource for pull request `id`
    pub fn new(
        account: impl Into<String>,
        slug: impl Into<String>,
        id: u64,
        endpoint: Arc<RepositoriesEndPoint>,
    ) -> Self {
        Self {
            account: account.into(),
            slug: slug.into(),
            id,
            endpoint,
        }
    }

    /// Pull request id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Fetch the pull request
    pub async fn get_pull_request(&self) -> Result<PullRequest> {
        self.endpoint
            .get_pull_request(&self.account, &self.slug, self.id)
            .await
    }

    /// Unified diff, verbatim
    pub async fn get_diff(&self) -> Result<String> {
        self.endpoint
            .get_pull_request_diff(&self.account, &self.slug, self.id)
            .await
    }

    /// Patch series, verbatim
    pub async fn get_patch(&self) -> Result<String> {
        self.endpoint
            .get_pull_request_patch(&self.account, &self.slug, self.id)
            .await
    }

    // ========================================================================
    // Activity
    // ========================================================================

    /// Activity log of this pull request; `max` of `0` returns everything
    pub async fn list_activities(&self, max: usize) -> Result<Vec<Activity>> {
        self.endpoint
            .list_pull_request_activities(&self.account, &self.slug, self.id, max)
            .await
    }

    /// Lazily enumerate the activity log
    pub fn enumerate_activities(&self, page_len: Option<u32>) -> HttpPaginator<Activity> {
        self.endpoint.enumerate_pull_request_activities(
            &self.account,
            &self.slug,
            self.id,
            &EnumerateParameters { page_len },
        )
    }

    /// Activity enumeration that stops once `token` is cancelled
    pub fn enumerate_activities_cancellable(
        &self,
        page_len: Option<u32>,
        token: CancellationToken,
    ) -> HttpCancellablePaginator<Activity> {
        self.enumerate_activities(page_len).cancellable(token)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Comments on this pull request; `max` of `0` returns everything
    pub async fn list_comments(&self, max: usize) -> Result<Vec<Comment>> {
        self.endpoint
            .list_pull_request_comments(&self.account, &self.slug, self.id, max)
            .await
    }

    /// Lazily enumerate the comments
    pub fn enumerate_comments(&self, page_len: Option<u32>) -> HttpPaginator<Comment> {
        self.endpoint.enumerate_pull_request_comments(
            &self.account,
            &self.slug,
            self.id,
            &EnumerateParameters { page_len },
        )
    }

    /// Fetch one comment by id
    pub async fn get_comment(&self, comment_id: u64) -> Result<Comment> {
        self.endpoint
            .get_pull_request_comment(&self.account, &self.slug, self.id, comment_id)
            .await
    }

    // ========================================================================
    // Review actions
    // ========================================================================

    /// Approve as the authenticated user
    pub async fn approve(&self) -> Result<Participant> {
        self.endpoint
            .approve_pull_request(&self.account, &self.slug, self.id)
            .await
    }

    /// Withdraw the authenticated user's approval
    pub async fn remove_approval(&self) -> Result<()> {
        self.endpoint
            .remove_pull_request_approval(&self.account, &self.slug, self.id)
            .await
    }

    /// Decline the pull request
    pub async fn decline(&self) -> Result<PullRequest> {
        self.endpoint
            .decline_pull_request(&self.account, &self.slug, self.id)
            .await
    }

    /// Merge; `None` leaves strategy and message to the server
    pub async fn accept_and_merge(&self, parameters: Option<&MergeParameters>) -> Result<PullRequest> {
        self.endpoint
            .accept_and_merge_pull_request(&self.account, &self.slug, self.id, parameters)
            .await
    }
}
