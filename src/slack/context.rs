//! Slack context generation
//!
//! Factories for the Slack context tree: source → channel → thread.
//! Channel contexts key on the channel id (stable even when channels
//! are renamed); thread contexts key on the channel id plus the thread
//! root timestamp.

use crate::model::{make_id, metadata_with_params, Context};

/// Unique identifier for this connector
pub const CONNECTOR_ID: &str = "slack";

/// Base URL for the Slack Web API
pub const SLACK_API_BASE_URL: &str = "https://slack.com/api";

// Resource type constants for context identification
pub const RESOURCE_TYPE_SOURCE: &str = "source";
pub const RESOURCE_TYPE_CHANNEL: &str = "channel";
pub const RESOURCE_TYPE_THREAD: &str = "thread";

/// Source context id: `slack:source`
pub fn source_context_id() -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_SOURCE, [])
}

/// Channel context id: `slack:channel:{channel_id}`
pub fn channel_context_id(channel_id: &str) -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_CHANNEL, [channel_id])
}

/// Thread context id: `slack:thread:{channel_id}:{thread_ts}`
pub fn thread_context_id(channel_id: &str, thread_ts: &str) -> String {
    make_id(CONNECTOR_ID, RESOURCE_TYPE_THREAD, [channel_id, thread_ts])
}

/// Factory for standardized Slack [`Context`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextGenerator;

impl ContextGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self
    }

    /// Level 1 source context for Slack
    pub fn source(&self) -> Context {
        let id = source_context_id();
        Context {
            name: id.clone(),
            id,
            level: 1,
            parent_id: String::new(), // top level, no parent
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_SOURCE.to_string(),
            title: Some("Slack".to_string()),
            description: Some("Activity source from Slack".to_string()),
            url: Some("https://slack.com".to_string()),
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[]),
        }
    }

    /// Level 2 channel context
    pub fn channel(&self, channel_id: &str, channel_name: &str) -> Context {
        Context {
            id: channel_context_id(channel_id),
            name: format!("channel #{channel_name}"),
            level: 2,
            parent_id: source_context_id(),
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_CHANNEL.to_string(),
            title: Some(format!("#{channel_name}")),
            description: None,
            url: None,
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[("channel_id", channel_id)]),
        }
    }

    /// Level 3 thread context
    pub fn thread(&self, channel_id: &str, thread_ts: &str) -> Context {
        Context {
            id: thread_context_id(channel_id, thread_ts),
            name: format!("Thread {thread_ts}"),
            level: 3,
            parent_id: channel_context_id(channel_id),
            connector_id: CONNECTOR_ID.to_string(),
            resource_type: RESOURCE_TYPE_THREAD.to_string(),
            title: Some(format!("Thread {thread_ts}")),
            description: None,
            url: None,
            created_at: None,
            updated_at: None,
            metadata: metadata_with_params(&[
                ("channel_id", channel_id),
                ("thread_ts", thread_ts),
            ]),
        }
    }
}
