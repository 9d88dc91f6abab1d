//! Pull request payloads

use super::common::{Branch, CommitRef, Participant, RepositoryRef, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestState {
    #[default]
    Open,
    Merged,
    Declined,
    Superseded,
}

impl PullRequestState {
    /// Value used in `state` query parameters
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
            Self::Superseded => "SUPERSEDED",
        }
    }
}

impl std::fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source or destination side of a pull request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryRef>,
}

impl BranchEndpoint {
    /// Endpoint naming only a branch of the current repository
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            branch: Some(Branch { name: name.into() }),
            ..Self::default()
        }
    }
}

/// A pull request
///
/// Created with `POST`, updated with `PUT`, never deleted (only declined).
/// Absent optional fields are left out of request bodies so that a `PUT`
/// only touches what the caller set. `reviewers` is always sent: an empty
/// list clears the reviewers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PullRequestState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<BranchEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<BranchEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default)]
    pub reviewers: Vec<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit: Option<CommitRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<User>,
    /// Reason given when declining
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PullRequest {
    /// New pull request from `source` into `destination`
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source: Some(BranchEndpoint::branch(source)),
            destination: Some(BranchEndpoint::branch(destination)),
            ..Self::default()
        }
    }

    /// Whether the pull request can still be merged or declined
    pub fn is_open(&self) -> bool {
        matches!(self.state, None | Some(PullRequestState::Open))
    }
}

/// How `accept_and_merge` combines the branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    #[default]
    MergeCommit,
    Squash,
    FastForward,
}

/// Body of the merge request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_source_branch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_strategy: Option<MergeStrategy>,
}
