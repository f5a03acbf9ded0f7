//! Slack connector configuration

use crate::config::{required_string, string_list};
use crate::error::Result;
use crate::pattern::validate_patterns;
use crate::types::JsonValue;

/// Config key carrying the bot token
pub const CONFIG_KEY_TOKEN: &str = "bot_token";
/// Config key carrying the user whose messages are fetched
pub const CONFIG_KEY_USER_ID: &str = "user_id";
/// Config key carrying the workspace domain (e.g. `acme.slack.com`)
pub const CONFIG_KEY_WORKSPACE_URL: &str = "workspace_url";
/// Config key carrying the optional channel allow patterns
pub const CONFIG_KEY_CHANNEL_PATTERNS: &str = "channel_patterns";

/// Validated configuration for a fetch run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Bot token with `search:read` scope
    pub token: String,
    /// User whose messages are searched
    pub user_id: String,
    /// Workspace domain used to build permalinks
    pub workspace_url: String,
    /// Channel-name allow patterns; empty means no restriction
    pub channel_patterns: Vec<String>,
}

impl FetchConfig {
    /// Parse and validate a fetch config from the host's JSON value.
    pub fn from_value(config: &JsonValue) -> Result<Self> {
        let token = required_string(config, CONFIG_KEY_TOKEN)?;
        let user_id = required_string(config, CONFIG_KEY_USER_ID)?;
        let workspace_url = required_string(config, CONFIG_KEY_WORKSPACE_URL)?;
        let channel_patterns = string_list(config, CONFIG_KEY_CHANNEL_PATTERNS);
        validate_patterns(&channel_patterns)?;

        Ok(Self {
            token,
            user_id,
            workspace_url,
            channel_patterns,
        })
    }
}

/// Validated configuration for an enrichment call
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Bot token
    pub token: String,
    /// Workspace domain used to build archive URLs
    pub workspace_url: String,
}

impl EnrichConfig {
    /// Parse and validate an enrich config from the host's JSON value.
    pub fn from_value(config: &JsonValue) -> Result<Self> {
        Ok(Self {
            token: required_string(config, CONFIG_KEY_TOKEN)?,
            workspace_url: required_string(config, CONFIG_KEY_WORKSPACE_URL)?,
        })
    }
}
