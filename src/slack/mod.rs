//! Slack activity connector
//!
//! Normalizes a user's Slack messages (via the search API) into
//! `message` activities with a source → channel → thread context
//! chain, and enriches channel and thread contexts from the
//! conversations API on demand.

pub mod api;
pub mod config;
pub mod context;
pub mod enrich;
pub mod fetch;
pub mod message;
pub mod transform;

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::warn;

use crate::connector::{CheckResult, Connector, ConnectorSpec, PropertyConfig};
use crate::error::Result;
use crate::model::{Activity, Context};
use crate::types::JsonValue;

pub use api::{EnrichApi, SearchApi, SlackClient};
pub use config::{EnrichConfig, FetchConfig};
pub use context::ContextGenerator;
pub use enrich::ContextEnricher;
pub use fetch::ActivityFetcher;
pub use message::RawMessage;
pub use transform::transform_message;

/// The Slack connector, wired to a live API client
pub struct SlackConnector {
    client: SlackClient,
}

impl SlackConnector {
    /// Create a connector against the public Slack API.
    pub fn new() -> Self {
        Self {
            client: SlackClient::new(),
        }
    }

    /// Create a connector against a custom base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: SlackClient::with_base_url(base_url),
        }
    }
}

impl Default for SlackConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for SlackConnector {
    fn spec(&self) -> ConnectorSpec {
        let mut properties = BTreeMap::new();
        properties.insert(
            config::CONFIG_KEY_TOKEN.to_string(),
            PropertyConfig::secret(
                "Bot User OAuth Token",
                "Slack Bot Token (xoxb-...) with search:read scope",
            ),
        );
        properties.insert(
            config::CONFIG_KEY_USER_ID.to_string(),
            PropertyConfig::string(
                "User ID",
                "Slack User ID to fetch messages for (e.g., U1234567890)",
            ),
        );
        properties.insert(
            config::CONFIG_KEY_WORKSPACE_URL.to_string(),
            PropertyConfig::string(
                "Workspace URL",
                "Your Slack workspace domain (e.g., your-workspace.slack.com)",
            )
            .with_placeholder("your-workspace.slack.com"),
        );
        properties.insert(
            config::CONFIG_KEY_CHANNEL_PATTERNS.to_string(),
            PropertyConfig::string_array(
                "Channel Patterns",
                "Optional channel-name allow patterns like eng-* — empty means every channel",
            ),
        );

        ConnectorSpec {
            name: context::CONNECTOR_ID.to_string(),
            title: "Slack".to_string(),
            description: Some(
                "Fetches a user's Slack messages and normalizes them into the shared \
                 context model"
                    .to_string(),
            ),
            properties,
            required: vec![
                config::CONFIG_KEY_TOKEN.to_string(),
                config::CONFIG_KEY_USER_ID.to_string(),
                config::CONFIG_KEY_WORKSPACE_URL.to_string(),
            ],
        }
    }

    async fn check(&self, config: &JsonValue) -> Result<CheckResult> {
        let config = FetchConfig::from_value(config)?;
        match self.client.check_auth(&config.token).await {
            Ok(()) => Ok(CheckResult::success()),
            Err(err) => Ok(CheckResult::failure(err.to_string())),
        }
    }

    async fn fetch_activities(
        &self,
        config: &JsonValue,
        target_date: &str,
    ) -> Result<Vec<Activity>> {
        let config = FetchConfig::from_value(config)?;
        let fetcher = ActivityFetcher::new(&self.client, config, target_date)?;
        fetcher.fetch_activities().await
    }

    async fn enrich_context(&self, context: Context, config: &JsonValue) -> Result<Context> {
        if context.enrichment_params().is_err() {
            // Not every level is enrichable; hand the context back as-is.
            warn!(
                "No enrichment params for context {}, skipping enrichment",
                context.id
            );
            return Ok(context);
        }

        let config = EnrichConfig::from_value(config)?;
        let enricher = ContextEnricher::new(&self.client, config);
        enricher.enrich(context).await
    }
}
