//! Slack API clients
//!
//! Trait seams for the two Slack surfaces the pipeline touches —
//! message search and conversation lookup — plus [`SlackClient`], the
//! wire implementation over the shared [`HttpClient`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::context::SLACK_API_BASE_URL;
use super::enrich::{ChannelInfoResponse, RepliesResponse};
use super::message::SearchResponse;
use crate::error::{Error, Result};
use crate::http::{AuthScheme, HttpClient, HttpClientConfig, RequestConfig};

/// Message search collaborator
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of the user's messages for the query date.
    async fn search_messages(
        &self,
        token: &str,
        user_id: &str,
        query_date: &str,
        page: u32,
    ) -> Result<SearchResponse>;
}

/// Conversation endpoints used by enrichment
#[async_trait]
pub trait EnrichApi: Send + Sync {
    /// Fetch channel details by id.
    async fn fetch_channel(&self, token: &str, channel_id: &str) -> Result<ChannelInfoResponse>;

    /// Fetch a thread's messages (parent first).
    async fn fetch_thread(
        &self,
        token: &str,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<RepliesResponse>;
}

/// Wire client for the Slack Web API
#[derive(Debug)]
pub struct SlackClient {
    http: HttpClient,
}

impl SlackClient {
    /// Create a client against the public Slack API.
    pub fn new() -> Self {
        Self::with_base_url(SLACK_API_BASE_URL)
    }

    /// Create a client against a custom base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = HttpClient::with_config(
            HttpClientConfig::builder().base_url(base_url).build(),
        );
        Self { http }
    }

    /// Validate the token against `auth.test`, translating Slack's
    /// error codes into the messages users actually act on.
    pub async fn check_auth(&self, token: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct AuthTestResponse {
            ok: bool,
            #[serde(default)]
            error: Option<String>,
        }

        let response: AuthTestResponse = self
            .http
            .post_json(
                "/auth.test",
                RequestConfig::new().auth(AuthScheme::Bearer, token),
            )
            .await?;

        if response.ok {
            return Ok(());
        }

        let message = match response.error.as_deref() {
            Some("invalid_auth") => "Authentication failed: Invalid or expired Bot Token",
            Some("account_inactive") => "Authentication failed: Account is inactive",
            Some("token_revoked") => "Authentication failed: Token has been revoked",
            Some("no_permission") => "Authentication failed: Token lacks required permissions",
            other => {
                return Err(Error::vendor(format!(
                    "Connection failed: {}",
                    other.unwrap_or("unknown error")
                )))
            }
        };
        Err(Error::vendor(message))
    }
}

impl Default for SlackClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchApi for SlackClient {
    async fn search_messages(
        &self,
        token: &str,
        user_id: &str,
        query_date: &str,
        page: u32,
    ) -> Result<SearchResponse> {
        let query = format!("from:@{user_id} on:{query_date}");
        debug!("Searching messages page {page}: {query}");

        self.http
            .get_json(
                "/search.messages",
                RequestConfig::new()
                    .auth(AuthScheme::Bearer, token)
                    .query("query", query)
                    .query("count", "100")
                    .query("page", page.to_string()),
            )
            .await
    }
}

#[async_trait]
impl EnrichApi for SlackClient {
    async fn fetch_channel(&self, token: &str, channel_id: &str) -> Result<ChannelInfoResponse> {
        self.http
            .get_json(
                "/conversations.info",
                RequestConfig::new()
                    .auth(AuthScheme::Bearer, token)
                    .query("channel", channel_id),
            )
            .await
    }

    async fn fetch_thread(
        &self,
        token: &str,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<RepliesResponse> {
        self.http
            .get_json(
                "/conversations.replies",
                RequestConfig::new()
                    .auth(AuthScheme::Bearer, token)
                    .query("channel", channel_id)
                    .query("ts", thread_ts),
            )
            .await
    }
}
