//! GitHub event transformation
//!
//! Maps each supported vendor event into one normalized [`Activity`]
//! with its context chain. Dispatch happens on the envelope's type tag;
//! unsupported tags and events without a usable timestamp are skippable
//! errors that the fetcher drops without failing the run.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::context::{ContextGenerator, CONNECTOR_ID};
use super::event::{
    DeletePayload, EventKind, GitRefInfo, IssueCommentPayload, IssuesPayload, PullRequestPayload,
    PushPayload, RawEvent, ReviewCommentPayload, ReviewPayload,
};
use crate::error::{Error, Result};
use crate::model::{make_activity_id, Activity};
use crate::types::{JsonObject, JsonValue};

/// Transform a raw GitHub event into a normalized activity.
pub fn transform_event(event: &RawEvent) -> Result<Activity> {
    let kind = EventKind::from_tag(&event.kind)
        .ok_or_else(|| Error::unsupported_event(&event.kind))?;

    match kind {
        EventKind::Push => transform_push(event),
        EventKind::PullRequest => transform_pull_request(event),
        EventKind::Issues => transform_issues(event),
        EventKind::IssueComment => transform_issue_comment(event),
        EventKind::Delete => transform_delete(event),
        EventKind::PullRequestReviewComment => transform_review_comment(event),
        EventKind::PullRequestReview => transform_review(event),
    }
}

fn transform_push(event: &RawEvent) -> Result<Activity> {
    let payload: PushPayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let metadata = object(json!({
        "branch": payload.git_ref,
        "before_commit": payload.before,
    }));

    let generator = ContextGenerator::new();
    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: "push".to_string(),
        title: format!("Push to {repo}"),
        description: Some(format!("Pushed to {} in {repo}", payload.git_ref)),
        url: Some(format!(
            "https://github.com/{repo}/commit/{}",
            payload.head
        )),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![generator.source(), generator.repository(repo)],
    })
}

fn transform_pull_request(event: &RawEvent) -> Result<Activity> {
    let payload: PullRequestPayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let number = payload.number;
    let action = &payload.action;
    let pr = &payload.pull_request;
    let (base_branch, base_sha) = ref_parts(pr.base.as_ref());
    let (head_branch, head_sha) = ref_parts(pr.head.as_ref());

    let metadata = object(json!({
        "pr_number": number,
        "action": action,
        "base_branch": base_branch,
        "head_branch": head_branch,
        "base_sha": base_sha,
        "head_sha": head_sha,
    }));

    let generator = ContextGenerator::new();
    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: "pull_request".to_string(),
        title: format!("PR #{number} {action} in {repo}"),
        description: Some(format!("Pull request #{number} was {action}")),
        url: Some(format!("https://github.com/{repo}/pull/{number}")),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![
            generator.source(),
            generator.repository(repo),
            generator.pull_request(repo, number),
        ],
    })
}

fn transform_issues(event: &RawEvent) -> Result<Activity> {
    let payload: IssuesPayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let issue = &payload.issue;
    let number = issue.number;
    let action = &payload.action;

    let metadata = object(json!({
        "issue_number": number,
        "action": action,
        "state": issue.state,
        "author": issue.user.as_ref().map(|user| user.login.clone()),
        "labels": issue.label_names(),
    }));

    let generator = ContextGenerator::new();
    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: "issues".to_string(),
        title: format!("Issue #{number} {action} in {repo}"),
        description: Some(format!("Issue #{number} was {action}")),
        url: issue.html_url.clone(),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![
            generator.source(),
            generator.repository(repo),
            generator.issue(repo, number),
        ],
    })
}

/// A single vendor tag covers comments on both issues and pull
/// requests; the issue's `pull_request` marker tells them apart.
fn transform_issue_comment(event: &RawEvent) -> Result<Activity> {
    let payload: IssueCommentPayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let issue = &payload.issue;
    let comment = &payload.comment;
    let number = issue.number;
    let on_pull_request = issue.is_pull_request();

    let metadata = object(json!({
        "comment_id": comment.id,
        "issue_number": number,
        "comment_author": comment.user.as_ref().map(|user| user.login.clone()),
        "comment_created_at": comment.created_at,
    }));

    let generator = ContextGenerator::new();
    let (activity_type, title, leaf) = if on_pull_request {
        (
            "pr_comment",
            format!("Commented on PR #{number}"),
            generator.pull_request(repo, number),
        )
    } else {
        (
            "issue_comment",
            format!("Commented on Issue #{number}"),
            generator.issue(repo, number),
        )
    };

    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: activity_type.to_string(),
        title,
        description: comment.body.clone(),
        url: comment.html_url.clone(),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![generator.source(), generator.repository(repo), leaf],
    })
}

fn transform_delete(event: &RawEvent) -> Result<Activity> {
    let payload: DeletePayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let metadata = object(json!({
        "ref_type": payload.ref_type,
        "ref": payload.git_ref,
        "deleted_by": event.actor.as_ref().map(|actor| actor.login.clone()),
        "pusher_type": payload.pusher_type,
    }));

    let generator = ContextGenerator::new();
    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: "delete".to_string(),
        title: format!(
            "Deleted {} {} in {repo}",
            payload.ref_type, payload.git_ref
        ),
        description: Some(format!(
            "{} {} was deleted",
            payload.ref_type, payload.git_ref
        )),
        url: Some(format!("https://github.com/{repo}")),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![generator.source(), generator.repository(repo)],
    })
}

fn transform_review_comment(event: &RawEvent) -> Result<Activity> {
    let payload: ReviewCommentPayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let pr = &payload.pull_request;
    let comment = &payload.comment;
    let number = pr
        .number
        .ok_or_else(|| Error::malformed("pull_request.number missing in review comment"))?;
    let (base_branch, _) = ref_parts(pr.base.as_ref());
    let (head_branch, _) = ref_parts(pr.head.as_ref());

    let metadata = object(json!({
        "comment_id": comment.id,
        "pr_number": number,
        "comment_author": comment.user.as_ref().map(|user| user.login.clone()),
        "file_path": comment.path,
        "commit_id": comment.commit_id,
        "base_branch": base_branch,
        "head_branch": head_branch,
    }));

    let generator = ContextGenerator::new();
    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: "pr_review_comment".to_string(),
        title: format!("Commented on PR #{number} in {repo}"),
        description: comment.body.clone(),
        url: comment.html_url.clone(),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![
            generator.source(),
            generator.repository(repo),
            generator.pull_request(repo, number),
        ],
    })
}

fn transform_review(event: &RawEvent) -> Result<Activity> {
    let payload: ReviewPayload = decode_payload(event)?;
    let repo = require_repo(event)?;
    let timestamp = require_timestamp(event)?;

    let pr = &payload.pull_request;
    let review = &payload.review;
    let number = pr
        .number
        .ok_or_else(|| Error::malformed("pull_request.number missing in review"))?;
    let (base_branch, _) = ref_parts(pr.base.as_ref());
    let (head_branch, _) = ref_parts(pr.head.as_ref());

    let metadata = object(json!({
        "pr_number": number,
        "review_state": review.state,
        "reviewer": review.user.as_ref().map(|user| user.login.clone()),
        "submitted_at": review.submitted_at,
        "base_branch": base_branch,
        "head_branch": head_branch,
    }));

    let generator = ContextGenerator::new();
    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &event.id),
        activity_type: "pr_review".to_string(),
        title: format!("Reviewed PR #{number} in {repo}"),
        description: review.body.clone(),
        url: review.html_url.clone(),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![
            generator.source(),
            generator.repository(repo),
            generator.pull_request(repo, number),
        ],
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn decode_payload<T: DeserializeOwned>(event: &RawEvent) -> Result<T> {
    serde_json::from_value(event.payload.clone())
        .map_err(|e| Error::malformed(format!("invalid payload in {}: {e}", event.kind)))
}

fn require_repo(event: &RawEvent) -> Result<&str> {
    event
        .repo_name()
        .ok_or_else(|| Error::malformed(format!("missing repo in {}", event.kind)))
}

fn require_timestamp(event: &RawEvent) -> Result<DateTime<Utc>> {
    event
        .timestamp()
        .ok_or_else(|| Error::missing_timestamp(format!("created_at unusable in {}", event.kind)))
}

fn ref_parts(info: Option<&GitRefInfo>) -> (Option<String>, Option<String>) {
    match info {
        Some(info) => (info.branch.clone(), info.sha.clone()),
        None => (None, None),
    }
}

fn object(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    }
}
