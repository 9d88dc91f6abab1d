//! Activity log entries and comments

use super::common::{Content, User};
use super::pull_request::{BranchEndpoint, PullRequest, PullRequestState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment on a pull request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    /// Parent comment for replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Comment>>,
    /// File and line for inline comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineLocation>,
}

impl Comment {
    /// Raw markdown text, if any
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.raw.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineLocation {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
}

/// Approval or change request by a reviewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Snapshot recorded when a pull request changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PullRequestState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<BranchEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<BranchEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Which action an [`Activity`] records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Update,
    Approval,
    Comment,
    ChangesRequested,
    /// Payload not recognised by this SDK
    Unknown,
}

/// Entry of a pull request activity log
///
/// Exactly one of the action payloads is set by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<ActivityUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<Approval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_requested: Option<Approval>,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        if self.update.is_some() {
            ActivityKind::Update
        } else if self.approval.is_some() {
            ActivityKind::Approval
        } else if self.comment.is_some() {
            ActivityKind::Comment
        } else if self.changes_requested.is_some() {
            ActivityKind::ChangesRequested
        } else {
            ActivityKind::Unknown
        }
    }

    /// Id of the pull request this entry belongs to
    pub fn pull_request_id(&self) -> Option<u64> {
        self.pull_request.as_ref().and_then(|pr| pr.id)
    }
}
