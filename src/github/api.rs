//! GitHub API clients
//!
//! The pipeline only ever talks to GitHub through the two trait seams
//! defined here, so tests inject in-memory fakes and the wire client
//! stays a thin adapter. [`GithubClient`] implements both traits over
//! the shared [`HttpClient`].

use async_trait::async_trait;
use tracing::debug;

use super::context::{CONNECTOR_ID, GITHUB_API_BASE_URL};
use super::enrich::{IssueResponse, PullRequestResponse, RepositoryResponse};
use super::event::RawEvent;
use crate::error::Result;
use crate::http::{AuthScheme, HttpClient, HttpClientConfig, RequestConfig};

/// Events feed endpoint collaborator
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Fetch one page of the user's event feed (newest first).
    async fn list_events(&self, token: &str, username: &str, page: u32) -> Result<Vec<RawEvent>>;
}

/// Resource endpoints used by enrichment
#[async_trait]
pub trait EnrichApi: Send + Sync {
    /// Fetch a repository by `owner/repo`.
    async fn fetch_repository(&self, token: &str, repo: &str) -> Result<RepositoryResponse>;

    /// Fetch a pull request by repository and number.
    async fn fetch_pull_request(
        &self,
        token: &str,
        repo: &str,
        number: &str,
    ) -> Result<PullRequestResponse>;

    /// Fetch an issue by repository and number.
    async fn fetch_issue(&self, token: &str, repo: &str, number: &str) -> Result<IssueResponse>;
}

/// Wire client for the GitHub REST API
#[derive(Debug)]
pub struct GithubClient {
    http: HttpClient,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_BASE_URL)
    }

    /// Create a client against a custom base URL (tests, GHE).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = HttpClient::with_config(
            HttpClientConfig::builder()
                .base_url(base_url)
                .header("Accept", "application/vnd.github+json")
                .user_agent(format!("pulse-connectors/{CONNECTOR_ID}"))
                .build(),
        );
        Self { http }
    }

    /// Validate the token by fetching the authenticated user.
    pub async fn check_auth(&self, token: &str) -> Result<()> {
        self.http
            .get("/user", RequestConfig::new().auth(AuthScheme::Token, token))
            .await?;
        Ok(())
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventsApi for GithubClient {
    async fn list_events(&self, token: &str, username: &str, page: u32) -> Result<Vec<RawEvent>> {
        let path = format!("/users/{username}/events");
        debug!("Fetching events page {page}: {path}");

        self.http
            .get_json(
                &path,
                RequestConfig::new()
                    .auth(AuthScheme::Token, token)
                    .query("per_page", "100")
                    .query("page", page.to_string()),
            )
            .await
    }
}

#[async_trait]
impl EnrichApi for GithubClient {
    async fn fetch_repository(&self, token: &str, repo: &str) -> Result<RepositoryResponse> {
        self.http
            .get_json(
                &format!("/repos/{repo}"),
                RequestConfig::new().auth(AuthScheme::Token, token),
            )
            .await
    }

    async fn fetch_pull_request(
        &self,
        token: &str,
        repo: &str,
        number: &str,
    ) -> Result<PullRequestResponse> {
        self.http
            .get_json(
                &format!("/repos/{repo}/pulls/{number}"),
                RequestConfig::new().auth(AuthScheme::Token, token),
            )
            .await
    }

    async fn fetch_issue(&self, token: &str, repo: &str, number: &str) -> Result<IssueResponse> {
        self.http
            .get_json(
                &format!("/repos/{repo}/issues/{number}"),
                RequestConfig::new().auth(AuthScheme::Token, token),
            )
            .await
    }
}
