//! GitHub activity connector
//!
//! Normalizes a user's GitHub event feed (pushes, pull requests,
//! issues, comments, reviews, deletes) into activities with a
//! source → repository → pull-request/issue context chain, and
//! enriches individual contexts from the REST API on demand.

pub mod api;
pub mod config;
pub mod context;
pub mod enrich;
pub mod event;
pub mod fetch;
pub mod transform;

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::warn;

use crate::connector::{CheckResult, Connector, ConnectorSpec, PropertyConfig};
use crate::error::Result;
use crate::model::{Activity, Context};
use crate::types::JsonValue;

pub use api::{EnrichApi, EventsApi, GithubClient};
pub use config::{EnrichConfig, FetchConfig};
pub use context::ContextGenerator;
pub use enrich::ContextEnricher;
pub use event::RawEvent;
pub use fetch::ActivityFetcher;
pub use transform::transform_event;

/// The GitHub connector, wired to a live API client
pub struct GithubConnector {
    client: GithubClient,
}

impl GithubConnector {
    /// Create a connector against the public GitHub API.
    pub fn new() -> Self {
        Self {
            client: GithubClient::new(),
        }
    }

    /// Create a connector against a custom base URL (tests, GHE).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: GithubClient::with_base_url(base_url),
        }
    }
}

impl Default for GithubConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for GithubConnector {
    fn spec(&self) -> ConnectorSpec {
        let mut properties = BTreeMap::new();
        properties.insert(
            config::CONFIG_KEY_TOKEN.to_string(),
            PropertyConfig::secret(
                "Personal Access Token",
                "GitHub personal access token with read access to the user's events",
            ),
        );
        properties.insert(
            config::CONFIG_KEY_USERNAME.to_string(),
            PropertyConfig::string("Username", "GitHub username to fetch events for"),
        );
        properties.insert(
            config::CONFIG_KEY_REPOSITORY_PATTERNS.to_string(),
            PropertyConfig::string_array(
                "Repository Patterns",
                "Optional allow patterns like owner/* — empty means every repository",
            ),
        );

        ConnectorSpec {
            name: context::CONNECTOR_ID.to_string(),
            title: "GitHub".to_string(),
            description: Some(
                "Fetches a user's GitHub activity and normalizes it into the shared \
                 context model"
                    .to_string(),
            ),
            properties,
            required: vec![
                config::CONFIG_KEY_TOKEN.to_string(),
                config::CONFIG_KEY_USERNAME.to_string(),
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

#[cfg(test)]
mod tests;
