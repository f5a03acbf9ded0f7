//! GitHub connector configuration
//!
//! Parses the host-supplied JSON config into validated structs. The
//! token and username are required; repository allow patterns are
//! optional and validated for wildcard sanity up front so the matcher
//! never sees an unsupported pattern.

use crate::config::{required_string, string_list};
use crate::error::Result;
use crate::pattern::validate_patterns;
use crate::types::JsonValue;

/// Config key carrying the personal access token
pub const CONFIG_KEY_TOKEN: &str = "credential_personal_access_token";
/// Config key carrying the GitHub username whose events are fetched
pub const CONFIG_KEY_USERNAME: &str = "username";
/// Config key carrying the optional repository allow patterns
pub const CONFIG_KEY_REPOSITORY_PATTERNS: &str = "repository_patterns";

/// Validated configuration for a fetch run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Personal access token
    pub token: String,
    /// Username whose event feed is read
    pub username: String,
    /// Repository allow patterns; empty means no restriction
    pub repository_patterns: Vec<String>,
}

impl FetchConfig {
    /// Parse and validate a fetch config from the host's JSON value.
    pub fn from_value(config: &JsonValue) -> Result<Self> {
        let token = required_string(config, CONFIG_KEY_TOKEN)?;
        let username = required_string(config, CONFIG_KEY_USERNAME)?;
        let repository_patterns = string_list(config, CONFIG_KEY_REPOSITORY_PATTERNS);
        validate_patterns(&repository_patterns)?;

        Ok(Self {
            token,
            username,
            repository_patterns,
        })
    }
}

/// Validated configuration for an enrichment call
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Personal access token
    pub token: String,
}

impl EnrichConfig {
    /// Parse and validate an enrich config from the host's JSON value.
    pub fn from_value(config: &JsonValue) -> Result<Self> {
        Ok(Self {
            token: required_string(config, CONFIG_KEY_TOKEN)?,
        })
    }
}
