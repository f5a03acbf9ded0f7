//! Typed GitHub event payloads
//!
//! The events API returns heterogeneous objects distinguished by a
//! `type` tag, with the type-specific fields nested under `payload`.
//! The envelope is decoded for every event (that is all the pagination
//! and filtering layers need); the payload is decoded into its typed
//! shape only when the transformer dispatches on the tag. A payload
//! that fails to decode marks that single event malformed — never the
//! whole page.

use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

// ============================================================================
// Envelope
// ============================================================================

/// One event as returned by `GET /users/{username}/events`
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Vendor event id (numeric string on the wire)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Vendor event-type tag, e.g. `PushEvent`
    #[serde(rename = "type")]
    pub kind: String,

    /// Event creation time (RFC3339)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Repository the event belongs to
    #[serde(default)]
    pub repo: Option<RepoRef>,

    /// Acting user
    #[serde(default)]
    pub actor: Option<ActorRef>,

    /// Type-specific payload, decoded lazily per event kind
    #[serde(default)]
    pub payload: JsonValue,
}

impl RawEvent {
    /// Parse the creation time, if present and well-formed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    /// Repository name (`owner/repo`), if the event carries one.
    pub fn repo_name(&self) -> Option<&str> {
        self.repo.as_ref().map(|repo| repo.name.as_str())
    }
}

/// Repository reference on the event envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRef {
    /// `owner/repo`
    pub name: String,
}

/// Acting-user reference on the event envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ActorRef {
    #[serde(default)]
    pub login: String,
}

/// Supported event kinds, parsed from the envelope tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    IssueComment,
    Delete,
    PullRequestReviewComment,
    PullRequestReview,
}

impl EventKind {
    /// Map a vendor tag to a supported kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PushEvent" => Some(Self::Push),
            "PullRequestEvent" => Some(Self::PullRequest),
            "IssuesEvent" => Some(Self::Issues),
            "IssueCommentEvent" => Some(Self::IssueComment),
            "DeleteEvent" => Some(Self::Delete),
            "PullRequestReviewCommentEvent" => Some(Self::PullRequestReviewComment),
            "PullRequestReviewEvent" => Some(Self::PullRequestReview),
            _ => None,
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// `PushEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    /// Pushed ref, e.g. `refs/heads/main`
    #[serde(rename = "ref", default)]
    pub git_ref: String,

    /// Head commit SHA after the push
    #[serde(default)]
    pub head: String,

    /// Commit SHA before the push
    #[serde(default)]
    pub before: Option<String>,
}

/// `PullRequestEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    /// PR number
    pub number: u64,

    /// Vendor action (`opened`, `closed`, ...)
    #[serde(default)]
    pub action: String,

    /// The pull request itself
    pub pull_request: PullRequestRef,
}

/// Pull request object embedded in several payloads
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    /// PR number (absent on `PullRequestEvent`, where it sits on the payload)
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub base: Option<GitRefInfo>,

    #[serde(default)]
    pub head: Option<GitRefInfo>,
}

/// Branch/sha pair on a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct GitRefInfo {
    /// Branch name
    #[serde(rename = "ref", default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub sha: Option<String>,
}

/// `IssuesEvent` and `IssueCommentEvent` issue object
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    /// Issue (or PR) number
    pub number: u64,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub user: Option<UserRef>,

    #[serde(default)]
    pub labels: Vec<LabelRef>,

    #[serde(default)]
    pub html_url: Option<String>,

    /// Present iff the issue is actually a pull request — the marker
    /// that splits `pr_comment` from `issue_comment`
    #[serde(default)]
    pub pull_request: Option<JsonValue>,
}

impl IssueRef {
    /// True when this "issue" is a pull request in disguise.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Label names in declaration order.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }
}

/// User object
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub login: String,
}

/// Label object
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRef {
    #[serde(default)]
    pub name: String,
}

/// `IssuesEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesPayload {
    #[serde(default)]
    pub action: String,

    pub issue: IssueRef,
}

/// `IssueCommentEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct IssueCommentPayload {
    pub issue: IssueRef,
    pub comment: CommentRef,
}

/// Comment object shared by comment-bearing payloads
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRef {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub user: Option<UserRef>,

    #[serde(default)]
    pub created_at: Option<String>,

    /// Reviewed file path (review comments only)
    #[serde(default)]
    pub path: Option<String>,

    /// Commit the review comment was left on (review comments only)
    #[serde(default)]
    pub commit_id: Option<String>,
}

/// `DeleteEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct DeletePayload {
    /// Deleted ref name
    #[serde(rename = "ref", default)]
    pub git_ref: String,

    /// `branch` or `tag`
    #[serde(default)]
    pub ref_type: String,

    #[serde(default)]
    pub pusher_type: Option<String>,
}

/// `PullRequestReviewCommentEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCommentPayload {
    pub pull_request: PullRequestRef,
    pub comment: CommentRef,
}

/// `PullRequestReviewEvent` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPayload {
    pub pull_request: PullRequestRef,
    pub review: ReviewRef,
}

/// Review object
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRef {
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub user: Option<UserRef>,

    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Accept both `"12345"` and `12345` for the event id.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value,
        StringOrNumber::Number(value) => value.to_string(),
    })
}
