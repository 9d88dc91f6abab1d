//! Bitbucket resource payloads
//!
//! Plain serde records. Unknown fields in server responses are ignored and
//! absent optional fields are skipped when serializing request bodies.

mod activity;
mod common;
mod pull_request;

pub use activity::{
    Activity, ActivityKind, ActivityUpdate, Approval, Comment, InlineLocation,
};
pub use common::{Branch, CommitRef, Content, Participant, ParticipantRole, RepositoryRef, User};
pub use pull_request::{
    BranchEndpoint, MergeParameters, MergeStrategy, PullRequest, PullRequestState,
};
