//! Connector trait and shared surface types
//!
//! Defines the trait both activity connectors implement, plus the
//! config-schema and connection-check shapes the host uses before ever
//! running a fetch.

use crate::error::Result;
use crate::model::{Activity, Context};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Connector Spec (config schema)
// ============================================================================

/// Connector specification returned by spec()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Unique connector name (e.g. "github")
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Configuration properties, keyed by field name
    pub properties: BTreeMap<String, PropertyConfig>,

    /// Names of required properties
    pub required: Vec<String>,
}

/// Configuration property definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Property type
    #[serde(rename = "type")]
    pub property_type: PropertyType,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Property description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether this is a secret (should be masked)
    #[serde(default)]
    pub secret: bool,

    /// Placeholder shown before the user types anything
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl PropertyConfig {
    /// A plain string property
    pub fn string(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            property_type: PropertyType::String,
            title: Some(title.into()),
            description: Some(description.into()),
            secret: false,
            placeholder: None,
        }
    }

    /// A secret string property (tokens, credentials)
    pub fn secret(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            secret: true,
            ..Self::string(title, description)
        }
    }

    /// A string-array property
    pub fn string_array(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            property_type: PropertyType::Array,
            ..Self::string(title, description)
        }
    }

    /// Set the placeholder
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Property type for configuration schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    String,
    Integer,
    Boolean,
    Array,
    Object,
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Core trait both activity connectors implement
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification (config schema)
    fn spec(&self) -> ConnectorSpec;

    /// Tests if credentials and configuration are valid
    async fn check(&self, config: &JsonValue) -> Result<CheckResult>;

    /// Fetches and normalizes one day of vendor activity.
    ///
    /// Returns every activity that survived date and allow-list
    /// filtering, or a single error; item-level transform failures are
    /// logged and dropped, never surfaced here.
    async fn fetch_activities(
        &self,
        config: &JsonValue,
        target_date: &str,
    ) -> Result<Vec<Activity>>;

    /// Enriches a single context with fresh vendor data.
    ///
    /// A context without `enrichment_params` in its metadata is handed
    /// back unmodified — not every level of the tree is enrichable, and
    /// that is not an error at this boundary.
    async fn enrich_context(&self, context: Context, config: &JsonValue) -> Result<Context>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_success() {
        let result = CheckResult::success();
        assert!(result.success);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_check_result_failure() {
        let result = CheckResult::failure("Connection failed");
        assert!(!result.success);
        assert_eq!(result.message, Some("Connection failed".to_string()));
    }

    #[test]
    fn test_property_config_builders() {
        let secret = PropertyConfig::secret("Token", "API token");
        assert!(secret.secret);
        assert_eq!(secret.property_type, PropertyType::String);

        let array = PropertyConfig::string_array("Patterns", "Allow patterns");
        assert_eq!(array.property_type, PropertyType::Array);
        assert!(!array.secret);

        let with_placeholder =
            PropertyConfig::string("Workspace", "Domain").with_placeholder("acme.slack.com");
        assert_eq!(
            with_placeholder.placeholder,
            Some("acme.slack.com".to_string())
        );
    }
}
