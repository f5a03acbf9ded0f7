//! GitHub context enrichment
//!
//! Given an already-constructed context and its `enrichment_params`,
//! re-fetches the backing resource and overwrites the display fields
//! and metadata. Identity fields (`id`, `level`, `parentId`) are never
//! touched; the existing metadata map — including `enrichment_params` —
//! is kept and extended.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::api::EnrichApi;
use super::config::EnrichConfig;
use super::context::{
    RESOURCE_TYPE_ISSUE, RESOURCE_TYPE_PULL_REQUEST, RESOURCE_TYPE_REPOSITORY,
    RESOURCE_TYPE_SOURCE,
};
use crate::error::{Error, Result};
use crate::model::Context;
use crate::types::JsonValue;

// ============================================================================
// Vendor Responses
// ============================================================================

/// `GET /repos/{repo}` response, reduced to the fields we keep
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryResponse {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub open_issues_count: Option<u64>,
    #[serde(default)]
    pub watchers_count: Option<u64>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// `GET /repos/{repo}/pulls/{number}` response
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub user: Option<NamedUser>,
    #[serde(default)]
    pub assignees: Vec<NamedUser>,
    #[serde(default)]
    pub requested_reviewers: Vec<NamedUser>,
    #[serde(default)]
    pub labels: Vec<NamedLabel>,
    #[serde(default)]
    pub base: Option<BranchRef>,
    #[serde(default)]
    pub head: Option<BranchRef>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub additions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
    #[serde(default)]
    pub changed_files: Option<u64>,
    #[serde(default)]
    pub commits: Option<u64>,
    #[serde(default)]
    pub merged: Option<bool>,
    #[serde(default)]
    pub merged_at: Option<String>,
    #[serde(default)]
    pub merged_by: Option<NamedUser>,
}

/// `GET /repos/{repo}/issues/{number}` response
#[derive(Debug, Clone, Deserialize)]
pub struct IssueResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub user: Option<NamedUser>,
    #[serde(default)]
    pub assignees: Vec<NamedUser>,
    #[serde(default)]
    pub labels: Vec<NamedLabel>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub comments: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedUser {
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedLabel {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref", default)]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub title: Option<String>,
}

fn logins(users: &[NamedUser]) -> Vec<String> {
    users.iter().map(|user| user.login.clone()).collect()
}

fn label_names(labels: &[NamedLabel]) -> Vec<String> {
    labels.iter().map(|label| label.name.clone()).collect()
}

// ============================================================================
// Enricher
// ============================================================================

/// Enriches GitHub contexts with fresh vendor data
pub struct ContextEnricher<'a> {
    api: &'a dyn EnrichApi,
    config: EnrichConfig,
}

impl<'a> ContextEnricher<'a> {
    /// Create an enricher for a validated config.
    pub fn new(api: &'a dyn EnrichApi, config: EnrichConfig) -> Self {
        Self { api, config }
    }

    /// Enrich one context, dispatching on its resource type.
    pub async fn enrich(&self, mut context: Context) -> Result<Context> {
        info!("Starting to enrich context {}", context.id);

        match context.resource_type.as_str() {
            RESOURCE_TYPE_SOURCE => {
                context.title = Some("GitHub".to_string());
                context.description = Some(
                    "Github is a code hosting platform for version control and collaboration."
                        .to_string(),
                );
                context.url = Some("https://github.com".to_string());
                Ok(context)
            }
            RESOURCE_TYPE_REPOSITORY => self.enrich_repository(context).await,
            RESOURCE_TYPE_PULL_REQUEST => self.enrich_pull_request(context).await,
            RESOURCE_TYPE_ISSUE => self.enrich_issue(context).await,
            other => Err(Error::UnsupportedContextType {
                resource_type: other.to_string(),
            }),
        }
    }

    async fn enrich_repository(&self, mut context: Context) -> Result<Context> {
        let repo = context.enrichment_param("repo")?.to_string();
        info!("Enriching repository: {repo}");

        let resp = self.api.fetch_repository(&self.config.token, &repo).await?;

        context.title = Some(format!("Repository: {}", resp.full_name));
        context.description = resp.description.clone();
        context.url = resp.html_url.clone();
        context.created_at = Some(resp.created_at);
        context.updated_at = Some(resp.updated_at);

        merge_metadata(
            &mut context,
            json!({
                "stargazers_count": resp.stargazers_count,
                "language": resp.language,
                "topics": resp.topics,
                "default_branch": resp.default_branch,
                "visibility": resp.visibility,
                "forks_count": resp.forks_count,
                "open_issues_count": resp.open_issues_count,
                "watchers_count": resp.watchers_count,
                "homepage": resp.homepage,
            }),
        );

        Ok(context)
    }

    async fn enrich_pull_request(&self, mut context: Context) -> Result<Context> {
        let repo = context.enrichment_param("repo")?.to_string();
        let number = context.enrichment_param("pr_number")?.to_string();
        info!("Enriching pull request: {repo} #{number}");

        let resp = self
            .api
            .fetch_pull_request(&self.config.token, &repo, &number)
            .await?;

        context.title = Some(resp.title.clone());
        context.description = resp.body.clone();
        context.url = resp.html_url.clone();
        context.created_at = Some(resp.created_at);
        context.updated_at = Some(resp.updated_at);

        merge_metadata(
            &mut context,
            json!({
                "state": resp.state,
                "author": resp.user.as_ref().map(|user| user.login.clone()),
                "assignees": logins(&resp.assignees),
                "reviewers": logins(&resp.requested_reviewers),
                "labels": label_names(&resp.labels),
                "base_branch": resp.base.as_ref().and_then(|b| b.branch.clone()),
                "head_branch": resp.head.as_ref().and_then(|b| b.branch.clone()),
                "milestone": resp.milestone.as_ref().and_then(|m| m.title.clone()),
                "additions": resp.additions,
                "deletions": resp.deletions,
                "changed_files": resp.changed_files,
                "commits_count": resp.commits,
                "merged": resp.merged,
                "merged_at": resp.merged_at,
                "merged_by": resp.merged_by.as_ref().map(|user| user.login.clone()),
            }),
        );

        Ok(context)
    }

    async fn enrich_issue(&self, mut context: Context) -> Result<Context> {
        let repo = context.enrichment_param("repo")?.to_string();
        let number = context.enrichment_param("issue_number")?.to_string();
        info!("Enriching issue: {repo} #{number}");

        let resp = self
            .api
            .fetch_issue(&self.config.token, &repo, &number)
            .await?;

        context.title = Some(resp.title.clone());
        context.description = resp.body.clone();
        context.url = resp.html_url.clone();
        context.created_at = Some(resp.created_at);
        context.updated_at = Some(resp.updated_at);

        merge_metadata(
            &mut context,
            json!({
                "state": resp.state,
                "author": resp.user.as_ref().map(|user| user.login.clone()),
                "assignees": logins(&resp.assignees),
                "labels": label_names(&resp.labels),
                "milestone": resp.milestone.as_ref().and_then(|m| m.title.clone()),
                "comments": resp.comments,
            }),
        );

        Ok(context)
    }
}

/// Fold freshly fetched fields into the context's metadata, keeping
/// whatever was already there (notably `enrichment_params`).
fn merge_metadata(context: &mut Context, fields: JsonValue) {
    if let JsonValue::Object(map) = fields {
        for (key, value) in map {
            context.metadata.insert(key, value);
        }
    }
}
