//! Slack message transformation
//!
//! Every search hit becomes one `message` activity with the full
//! three-level chain: source → channel → thread. The thread leaf keys
//! on the permalink's `thread_ts` when the message is a reply, else on
//! the message's own timestamp (it is the thread root).

use serde_json::json;

use super::context::{ContextGenerator, CONNECTOR_ID};
use super::message::RawMessage;
use crate::error::{Error, Result};
use crate::model::{make_activity_id, Activity};
use crate::types::{JsonObject, JsonValue, OptionStringExt};

/// Transform a raw Slack message into a normalized activity.
pub fn transform_message(message: &RawMessage, generator: &ContextGenerator) -> Result<Activity> {
    if message.ts.is_empty() {
        return Err(Error::malformed("message missing ts field"));
    }

    let channel = message
        .channel
        .as_ref()
        .ok_or_else(|| Error::malformed("message missing channel object"))?;
    if channel.id.is_empty() || channel.name.is_empty() {
        return Err(Error::malformed("channel missing id or name"));
    }

    let timestamp = message
        .timestamp()
        .ok_or_else(|| Error::missing_timestamp(format!("ts '{}' unusable", message.ts)))?;

    let thread_ts = message.thread_ts().to_string();

    let metadata = match json!({
        "channel_id": channel.id,
        "channel_name": channel.name,
        "user": message.username,
        "thread_ts": thread_ts,
        "team": message.team,
    }) {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    };

    Ok(Activity {
        id: make_activity_id(CONNECTOR_ID, &message.ts),
        activity_type: "message".to_string(),
        title: format!("Message in #{}", channel.name),
        description: Some(message.text.clone()),
        url: message.permalink.clone().none_if_empty(),
        timestamp,
        source: CONNECTOR_ID.to_string(),
        metadata,
        contexts: vec![
            generator.source(),
            generator.channel(&channel.id, &channel.name),
            generator.thread(&channel.id, &thread_ts),
        ],
    })
}
