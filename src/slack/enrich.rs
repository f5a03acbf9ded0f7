//! Slack context enrichment
//!
//! Channels are enriched from `conversations.info`, threads from
//! `conversations.replies` (whose first message is the thread parent).
//! As everywhere, identity fields stay untouched and the metadata map
//! is extended in place.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::api::EnrichApi;
use super::config::EnrichConfig;
use super::context::{RESOURCE_TYPE_CHANNEL, RESOURCE_TYPE_SOURCE, RESOURCE_TYPE_THREAD};
use super::message::{format_slack_ts, parse_slack_ts};
use crate::error::{Error, Result};
use crate::model::Context;
use crate::types::JsonValue;

// ============================================================================
// Vendor Responses
// ============================================================================

/// `conversations.info` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInfoResponse {
    pub ok: bool,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub channel: Option<ChannelInfo>,
}

/// Channel object from `conversations.info`
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub topic: Option<TopicInfo>,

    #[serde(default)]
    pub purpose: Option<TopicInfo>,

    /// Creation time, epoch seconds
    #[serde(default)]
    pub created: Option<i64>,

    /// Last update time, epoch milliseconds
    #[serde(default)]
    pub updated: Option<i64>,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_channel: bool,

    #[serde(default)]
    pub is_group: bool,

    #[serde(default)]
    pub is_im: bool,

    #[serde(default)]
    pub context_team_id: String,
}

/// Topic/purpose wrapper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicInfo {
    #[serde(default)]
    pub value: String,
}

/// `conversations.replies` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RepliesResponse {
    pub ok: bool,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub messages: Vec<ThreadMessage>,
}

/// One message in a thread
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    #[serde(default)]
    pub ts: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub team: String,

    #[serde(default)]
    pub thread_ts: String,

    #[serde(default)]
    pub reply_count: Option<u64>,

    #[serde(default)]
    pub reply_users_count: Option<u64>,
}

// ============================================================================
// Enricher
// ============================================================================

/// Enriches Slack contexts with fresh vendor data
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
                context.title = Some("Slack".to_string());
                context.description = Some("Activity source from Slack".to_string());
                context.url = Some(format!("https://{}", self.config.workspace_url));
                Ok(context)
            }
            RESOURCE_TYPE_CHANNEL => self.enrich_channel(context).await,
            RESOURCE_TYPE_THREAD => self.enrich_thread(context).await,
            other => Err(Error::UnsupportedContextType {
                resource_type: other.to_string(),
            }),
        }
    }

    async fn enrich_channel(&self, mut context: Context) -> Result<Context> {
        let channel_id = context.enrichment_param("channel_id")?.to_string();
        info!("Enriching channel: {channel_id}");

        let resp = self
            .api
            .fetch_channel(&self.config.token, &channel_id)
            .await?;
        if !resp.ok {
            return Err(Error::vendor(
                resp.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let channel = resp
            .channel
            .ok_or_else(|| Error::malformed("invalid channel data in API response"))?;

        let topic = channel
            .topic
            .as_ref()
            .map(|t| t.value.clone())
            .unwrap_or_default();
        let purpose = channel
            .purpose
            .as_ref()
            .map(|t| t.value.clone())
            .unwrap_or_default();

        context.title = Some(format!("#{}", channel.name));
        context.description = Some(topic.clone());
        context.url = Some(format!(
            "https://{}/archives/{}",
            self.config.workspace_url, channel.id
        ));
        context.created_at = channel
            .created
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single());
        context.updated_at = channel.updated.and_then(DateTime::from_timestamp_millis);

        merge_metadata(
            &mut context,
            json!({
                "name": channel.name,
                "is_private": channel.is_private,
                "is_channel": channel.is_channel,
                "is_group": channel.is_group,
                "is_im": channel.is_im,
                "topic": topic,
                "purpose": purpose,
                "context_team_id": channel.context_team_id,
            }),
        );

        Ok(context)
    }

    async fn enrich_thread(&self, mut context: Context) -> Result<Context> {
        let channel_id = context.enrichment_param("channel_id")?.to_string();
        let thread_ts = context.enrichment_param("thread_ts")?.to_string();
        info!("Enriching thread: {thread_ts} in channel {channel_id}");

        let resp = self
            .api
            .fetch_thread(&self.config.token, &channel_id, &thread_ts)
            .await?;
        if !resp.ok {
            return Err(Error::vendor(
                resp.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let parent = resp
            .messages
            .first()
            .ok_or_else(|| Error::malformed("messages array is empty or invalid"))?;

        let created_at = parse_slack_ts(&parent.thread_ts)
            .map_err(|e| Error::malformed(format!("failed to parse thread createdAt: {e}")))?;

        context.title = Some(format!("Thread: {}", parent.text));
        context.description = Some(parent.text.clone());
        context.url = Some(format!(
            "https://{}/archives/{}/p{}",
            self.config.workspace_url,
            channel_id,
            format_slack_ts(&parent.ts)
        ));
        context.created_at = Some(created_at);
        // Slack does not report an update time for threads.
        context.updated_at = Some(created_at);

        merge_metadata(
            &mut context,
            json!({
                "parent_user": parent.user,
                "parent_ts": parent.ts,
                "thread_ts": parent.thread_ts,
                "team": parent.team,
                "reply_count": parent.reply_count,
                "reply_users_count": parent.reply_users_count,
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
