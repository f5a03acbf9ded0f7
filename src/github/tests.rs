//! Tests for the GitHub connector pipeline

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::api::{EnrichApi, EventsApi};
use super::config::FetchConfig;
use super::enrich::{ContextEnricher, IssueResponse, PullRequestResponse, RepositoryResponse};
use super::fetch::ActivityFetcher;
use super::transform::transform_event;
use super::*;
use crate::error::Error;
use crate::types::JsonValue;

fn event(value: JsonValue) -> RawEvent {
    serde_json::from_value(value).unwrap()
}

fn push_event() -> RawEvent {
    event(json!({
        "id": "1001",
        "type": "PushEvent",
        "created_at": "2025-12-13T10:00:00Z",
        "repo": {"name": "acme/widgets"},
        "actor": {"login": "octocat"},
        "payload": {
            "ref": "refs/heads/main",
            "head": "abc123",
            "before": "def456"
        }
    }))
}

fn pull_request_event() -> RawEvent {
    event(json!({
        "id": "1002",
        "type": "PullRequestEvent",
        "created_at": "2025-12-13T11:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {
            "number": 42,
            "action": "opened",
            "pull_request": {
                "base": {"ref": "main", "sha": "base123"},
                "head": {"ref": "feature", "sha": "head456"}
            }
        }
    }))
}

fn issue_comment_event(on_pull_request: bool) -> RawEvent {
    let mut issue = json!({
        "number": 7,
        "user": {"login": "octocat"}
    });
    if on_pull_request {
        issue["pull_request"] = json!({"url": "https://api.github.com/repos/acme/widgets/pulls/7"});
    }
    event(json!({
        "id": "1003",
        "type": "IssueCommentEvent",
        "created_at": "2025-12-13T12:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {
            "issue": issue,
            "comment": {
                "id": 555,
                "body": "Looks good",
                "html_url": "https://github.com/acme/widgets/issues/7#issuecomment-555",
                "user": {"login": "reviewer"},
                "created_at": "2025-12-13T12:00:00Z"
            }
        }
    }))
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transform_push() {
    let activity = transform_event(&push_event()).unwrap();

    assert_eq!(activity.id, "github:1001");
    assert_eq!(activity.activity_type, "push");
    assert_eq!(activity.title, "Push to acme/widgets");
    assert_eq!(
        activity.description.as_deref(),
        Some("Pushed to refs/heads/main in acme/widgets")
    );
    assert_eq!(
        activity.url.as_deref(),
        Some("https://github.com/acme/widgets/commit/abc123")
    );
    assert_eq!(activity.source, "github");
    assert_eq!(activity.metadata["branch"], "refs/heads/main");
    assert_eq!(activity.metadata["before_commit"], "def456");

    // Container-level event: two contexts, root first.
    assert_eq!(activity.contexts.len(), 2);
    assert_eq!(activity.contexts[0].id, "github:source");
    assert_eq!(activity.contexts[1].id, "github:repository:acme/widgets");
    assert_eq!(activity.contexts[1].parent_id, "github:source");
}

#[test]
fn test_transform_pull_request() {
    let activity = transform_event(&pull_request_event()).unwrap();

    assert_eq!(activity.activity_type, "pull_request");
    assert_eq!(activity.title, "PR #42 opened in acme/widgets");
    assert_eq!(
        activity.url.as_deref(),
        Some("https://github.com/acme/widgets/pull/42")
    );
    assert_eq!(activity.metadata["pr_number"], 42);
    assert_eq!(activity.metadata["base_branch"], "main");
    assert_eq!(activity.metadata["head_sha"], "head456");

    assert_eq!(activity.contexts.len(), 3);
    assert_eq!(
        activity.contexts[2].id,
        "github:pull_request:acme/widgets:42"
    );
    assert_eq!(
        activity.contexts[2].parent_id,
        "github:repository:acme/widgets"
    );
}

#[test]
fn test_transform_issues() {
    let activity = transform_event(&event(json!({
        "id": "1004",
        "type": "IssuesEvent",
        "created_at": "2025-12-13T09:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {
            "action": "closed",
            "issue": {
                "number": 7,
                "state": "closed",
                "user": {"login": "octocat"},
                "labels": [{"name": "bug"}, {"name": "p1"}],
                "html_url": "https://github.com/acme/widgets/issues/7"
            }
        }
    })))
    .unwrap();

    assert_eq!(activity.activity_type, "issues");
    assert_eq!(activity.title, "Issue #7 closed in acme/widgets");
    assert_eq!(activity.metadata["author"], "octocat");
    assert_eq!(
        activity.metadata["labels"],
        json!(["bug", "p1"])
    );
    assert_eq!(activity.contexts[2].id, "github:issue:acme/widgets:7");
}

#[test]
fn test_transform_comment_on_pull_request() {
    let activity = transform_event(&issue_comment_event(true)).unwrap();

    assert_eq!(activity.activity_type, "pr_comment");
    assert_eq!(activity.title, "Commented on PR #7");
    assert_eq!(activity.description.as_deref(), Some("Looks good"));
    assert_eq!(
        activity.contexts[2].id,
        "github:pull_request:acme/widgets:7"
    );
}

#[test]
fn test_transform_comment_on_plain_issue() {
    let activity = transform_event(&issue_comment_event(false)).unwrap();

    assert_eq!(activity.activity_type, "issue_comment");
    assert_eq!(activity.title, "Commented on Issue #7");
    assert_eq!(activity.metadata["comment_author"], "reviewer");
    assert_eq!(activity.contexts[2].id, "github:issue:acme/widgets:7");
}

#[test]
fn test_transform_delete() {
    let activity = transform_event(&event(json!({
        "id": "1005",
        "type": "DeleteEvent",
        "created_at": "2025-12-13T08:00:00Z",
        "repo": {"name": "acme/widgets"},
        "actor": {"login": "octocat"},
        "payload": {
            "ref": "feature-old",
            "ref_type": "branch",
            "pusher_type": "user"
        }
    })))
    .unwrap();

    assert_eq!(activity.activity_type, "delete");
    assert_eq!(activity.title, "Deleted branch feature-old in acme/widgets");
    assert_eq!(activity.metadata["deleted_by"], "octocat");
    assert_eq!(activity.contexts.len(), 2);
}

#[test]
fn test_transform_review() {
    let activity = transform_event(&event(json!({
        "id": "1006",
        "type": "PullRequestReviewEvent",
        "created_at": "2025-12-13T14:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {
            "pull_request": {
                "number": 42,
                "base": {"ref": "main"},
                "head": {"ref": "feature"}
            },
            "review": {
                "state": "approved",
                "body": "Ship it",
                "html_url": "https://github.com/acme/widgets/pull/42#review-1",
                "user": {"login": "reviewer"},
                "submitted_at": "2025-12-13T14:00:00Z"
            }
        }
    })))
    .unwrap();

    assert_eq!(activity.activity_type, "pr_review");
    assert_eq!(activity.title, "Reviewed PR #42 in acme/widgets");
    assert_eq!(activity.metadata["review_state"], "approved");
    assert_eq!(activity.metadata["reviewer"], "reviewer");
    assert_eq!(
        activity.contexts[2].id,
        "github:pull_request:acme/widgets:42"
    );
}

#[test]
fn test_transform_review_comment() {
    let activity = transform_event(&event(json!({
        "id": "1007",
        "type": "PullRequestReviewCommentEvent",
        "created_at": "2025-12-13T15:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {
            "pull_request": {
                "number": 42,
                "base": {"ref": "main"},
                "head": {"ref": "feature"}
            },
            "comment": {
                "id": 777,
                "body": "Typo here",
                "html_url": "https://github.com/acme/widgets/pull/42#discussion-777",
                "user": {"login": "reviewer"},
                "path": "src/lib.rs",
                "commit_id": "abc123"
            }
        }
    })))
    .unwrap();

    assert_eq!(activity.activity_type, "pr_review_comment");
    assert_eq!(activity.metadata["file_path"], "src/lib.rs");
    assert_eq!(activity.metadata["commit_id"], "abc123");
}

#[test]
fn test_transform_unknown_type_is_skippable() {
    let err = transform_event(&event(json!({
        "id": "1008",
        "type": "WatchEvent",
        "created_at": "2025-12-13T10:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {}
    })))
    .unwrap_err();

    assert!(matches!(err, Error::UnsupportedEventType { ref kind } if kind == "WatchEvent"));
    assert!(err.is_skippable());
}

#[test]
fn test_transform_missing_timestamp_is_skippable() {
    let err = transform_event(&event(json!({
        "id": "1009",
        "type": "PushEvent",
        "repo": {"name": "acme/widgets"},
        "payload": {"ref": "refs/heads/main", "head": "abc123"}
    })))
    .unwrap_err();

    assert!(matches!(err, Error::MissingTimestamp { .. }));
    assert!(err.is_skippable());
}

#[test]
fn test_transform_malformed_payload_is_skippable() {
    // PullRequestEvent without a PR number cannot be normalized.
    let err = transform_event(&event(json!({
        "id": "1010",
        "type": "PullRequestEvent",
        "created_at": "2025-12-13T10:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {"action": "opened", "pull_request": {}}
    })))
    .unwrap_err();

    assert!(matches!(err, Error::MalformedPayload { .. }));
    assert!(err.is_skippable());
}

#[test]
fn test_repeated_transform_yields_identical_repository_contexts() {
    let a = transform_event(&push_event()).unwrap();
    let b = transform_event(&pull_request_event()).unwrap();

    // Fresh instances, structurally equal — consumers merge on id.
    assert_eq!(a.contexts[1], b.contexts[1]);
}

// ============================================================================
// Fetch
// ============================================================================

struct MockEventsApi {
    pages: Vec<Vec<RawEvent>>,
    calls: AtomicU32,
}

impl MockEventsApi {
    fn new(pages: Vec<Vec<RawEvent>>) -> Self {
        Self {
            pages,
            calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventsApi for MockEventsApi {
    async fn list_events(
        &self,
        _token: &str,
        _username: &str,
        page: u32,
    ) -> crate::error::Result<Vec<RawEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }
}

struct FailingEventsApi;

#[async_trait]
impl EventsApi for FailingEventsApi {
    async fn list_events(
        &self,
        _token: &str,
        _username: &str,
        _page: u32,
    ) -> crate::error::Result<Vec<RawEvent>> {
        Err(Error::http_status(500, "boom"))
    }
}

fn fetch_config(patterns: &[&str]) -> FetchConfig {
    FetchConfig {
        token: "ghp_test".to_string(),
        username: "octocat".to_string(),
        repository_patterns: patterns.iter().map(|s| (*s).to_string()).collect(),
    }
}

#[tokio::test]
async fn test_fetch_stops_on_empty_page() {
    let api = MockEventsApi::new(vec![vec![push_event()], vec![], vec![pull_request_event()]]);
    let fetcher = ActivityFetcher::new(&api, fetch_config(&[]), "2025-12-13").unwrap();

    let activities = fetcher.fetch_activities().await.unwrap();

    assert_eq!(activities.len(), 1);
    // Page 2 was empty, so page 3 must never be requested.
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn test_fetch_stops_when_events_predate_window() {
    let old_event = event(json!({
        "id": "900",
        "type": "PushEvent",
        "created_at": "2025-12-12T23:00:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {"ref": "refs/heads/main", "head": "old"}
    }));

    let api = MockEventsApi::new(vec![
        vec![push_event(), old_event],
        vec![pull_request_event()],
    ]);
    let fetcher = ActivityFetcher::new(&api, fetch_config(&[]), "2025-12-13").unwrap();

    let activities = fetcher.fetch_activities().await.unwrap();

    assert_eq!(activities.len(), 1);
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_fetch_honors_page_ceiling() {
    let api = MockEventsApi::new(vec![
        vec![push_event()],
        vec![push_event()],
        vec![push_event()],
        vec![push_event()], // beyond the vendor ceiling, must not be fetched
    ]);
    let fetcher = ActivityFetcher::new(&api, fetch_config(&[]), "2025-12-13").unwrap();

    let activities = fetcher.fetch_activities().await.unwrap();

    assert_eq!(activities.len(), 3);
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_fetch_filters_by_repository_pattern() {
    let other_repo = event(json!({
        "id": "1100",
        "type": "PushEvent",
        "created_at": "2025-12-13T10:30:00Z",
        "repo": {"name": "stranger/things"},
        "payload": {"ref": "refs/heads/main", "head": "zzz"}
    }));

    let api = MockEventsApi::new(vec![vec![push_event(), other_repo]]);
    let fetcher = ActivityFetcher::new(&api, fetch_config(&["acme/*"]), "2025-12-13").unwrap();

    let activities = fetcher.fetch_activities().await.unwrap();

    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].title, "Push to acme/widgets");
}

#[tokio::test]
async fn test_fetch_skips_bad_events_and_continues() {
    let unknown = event(json!({
        "id": "1200",
        "type": "WatchEvent",
        "created_at": "2025-12-13T10:30:00Z",
        "repo": {"name": "acme/widgets"},
        "payload": {}
    }));

    let api = MockEventsApi::new(vec![vec![push_event(), unknown, pull_request_event()]]);
    let fetcher = ActivityFetcher::new(&api, fetch_config(&[]), "2025-12-13").unwrap();

    let activities = fetcher.fetch_activities().await.unwrap();

    // One unsupported event never fails the fetch.
    assert_eq!(activities.len(), 2);
}

#[tokio::test]
async fn test_fetch_propagates_vendor_error() {
    let fetcher =
        ActivityFetcher::new(&FailingEventsApi, fetch_config(&[]), "2025-12-13").unwrap();
    let err = fetcher.fetch_activities().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[test]
fn test_fetcher_rejects_bad_target_date() {
    let api = MockEventsApi::new(vec![]);
    let err = ActivityFetcher::new(&api, fetch_config(&[]), "12/13/2025").unwrap_err();
    assert!(matches!(err, Error::InvalidDateFormat { .. }));
}

// ============================================================================
// Enrich
// ============================================================================

struct MockEnrichApi;

#[async_trait]
impl EnrichApi for MockEnrichApi {
    async fn fetch_repository(
        &self,
        _token: &str,
        repo: &str,
    ) -> crate::error::Result<RepositoryResponse> {
        assert_eq!(repo, "acme/widgets");
        Ok(serde_json::from_value(json!({
            "full_name": "acme/widgets",
            "description": "hello",
            "html_url": "https://github.com/acme/widgets",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2025-12-01T00:00:00Z",
            "stargazers_count": 42,
            "language": "Rust",
            "topics": ["tooling"],
            "default_branch": "main",
            "visibility": "public",
            "forks_count": 3,
            "open_issues_count": 5,
            "watchers_count": 42
        }))
        .unwrap())
    }

    async fn fetch_pull_request(
        &self,
        _token: &str,
        _repo: &str,
        number: &str,
    ) -> crate::error::Result<PullRequestResponse> {
        assert_eq!(number, "42");
        Ok(serde_json::from_value(json!({
            "title": "Add widget polish",
            "body": "Polishes the widgets",
            "html_url": "https://github.com/acme/widgets/pull/42",
            "created_at": "2025-12-10T00:00:00Z",
            "updated_at": "2025-12-12T00:00:00Z",
            "state": "open",
            "user": {"login": "octocat"},
            "assignees": [{"login": "octocat"}],
            "requested_reviewers": [{"login": "reviewer"}],
            "labels": [{"name": "enhancement"}],
            "base": {"ref": "main"},
            "head": {"ref": "polish"},
            "additions": 120,
            "deletions": 8,
            "changed_files": 4,
            "commits": 3,
            "merged": false
        }))
        .unwrap())
    }

    async fn fetch_issue(
        &self,
        _token: &str,
        _repo: &str,
        number: &str,
    ) -> crate::error::Result<IssueResponse> {
        assert_eq!(number, "7");
        Ok(serde_json::from_value(json!({
            "title": "Widgets misbehave",
            "body": "They wobble",
            "html_url": "https://github.com/acme/widgets/issues/7",
            "created_at": "2025-12-01T00:00:00Z",
            "updated_at": "2025-12-11T00:00:00Z",
            "state": "open",
            "user": {"login": "octocat"},
            "labels": [{"name": "bug"}],
            "comments": 2
        }))
        .unwrap())
    }
}

fn enricher(api: &MockEnrichApi) -> ContextEnricher<'_> {
    ContextEnricher::new(
        api,
        EnrichConfig {
            token: "ghp_test".to_string(),
        },
    )
}

#[tokio::test]
async fn test_enrich_repository_overwrites_display_fields() {
    let api = MockEnrichApi;
    let before = ContextGenerator::new().repository("acme/widgets");

    let after = enricher(&api).enrich(before.clone()).await.unwrap();

    assert_eq!(after.description.as_deref(), Some("hello"));
    assert_eq!(after.title.as_deref(), Some("Repository: acme/widgets"));
    assert_eq!(
        after.url.as_deref(),
        Some("https://github.com/acme/widgets")
    );
    assert!(after.created_at.is_some());
    assert_eq!(after.metadata["stargazers_count"], 42);
    assert_eq!(after.metadata["language"], "Rust");

    // Identity is untouched and params survive for re-enrichment.
    assert_eq!(after.id, before.id);
    assert_eq!(after.level, before.level);
    assert_eq!(after.parent_id, before.parent_id);
    assert_eq!(after.enrichment_param("repo").unwrap(), "acme/widgets");
}

#[tokio::test]
async fn test_enrich_pull_request() {
    let api = MockEnrichApi;
    let before = ContextGenerator::new().pull_request("acme/widgets", 42);

    let after = enricher(&api).enrich(before).await.unwrap();

    assert_eq!(after.title.as_deref(), Some("Add widget polish"));
    assert_eq!(after.metadata["author"], "octocat");
    assert_eq!(after.metadata["reviewers"], json!(["reviewer"]));
    assert_eq!(after.metadata["base_branch"], "main");
    assert_eq!(after.metadata["commits_count"], 3);
}

#[tokio::test]
async fn test_enrich_issue() {
    let api = MockEnrichApi;
    let before = ContextGenerator::new().issue("acme/widgets", 7);

    let after = enricher(&api).enrich(before).await.unwrap();

    assert_eq!(after.title.as_deref(), Some("Widgets misbehave"));
    assert_eq!(after.metadata["comments"], 2);
    assert_eq!(after.metadata["labels"], json!(["bug"]));
}

#[tokio::test]
async fn test_enrich_source_is_static() {
    let api = MockEnrichApi;
    let before = ContextGenerator::new().source();

    let after = enricher(&api).enrich(before).await.unwrap();

    assert_eq!(after.title.as_deref(), Some("GitHub"));
    assert_eq!(after.url.as_deref(), Some("https://github.com"));
}

#[tokio::test]
async fn test_enrich_unknown_resource_type_fails() {
    let api = MockEnrichApi;
    let mut context = ContextGenerator::new().repository("acme/widgets");
    context.resource_type = "workflow".to_string();

    let err = enricher(&api).enrich(context).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedContextType { .. }));
}

#[tokio::test]
async fn test_enrich_missing_param_fails() {
    let api = MockEnrichApi;
    let mut context = ContextGenerator::new().repository("acme/widgets");
    context.metadata = crate::model::metadata_with_params(&[]);

    let err = enricher(&api).enrich(context).await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
