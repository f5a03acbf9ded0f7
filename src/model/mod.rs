//! Normalized activity model
//!
//! The vendor-neutral shapes both connectors produce: an [`Activity`] for
//! each vendor event, carrying an ordered chain of [`Context`] nodes that
//! describe what the activity is about (source → container → leaf).
//!
//! Contexts are identified by deterministic string ids built with
//! [`make_id`]; two activities that touch the same resource carry
//! structurally equal context values, and consumers merge on `id`
//! equality rather than object identity.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata key under which a context stores the parameters needed to
/// re-fetch its backing resource.
pub const ENRICHMENT_PARAMS_KEY: &str = "enrichment_params";

// ============================================================================
// Context
// ============================================================================

/// A node in the resource-ownership tree attached to an activity.
///
/// Level 1 is the connector's single source root, level 2 a container
/// (repository or channel), level 3 a leaf (pull request, issue or
/// thread). `parent_id` walks toward the root and is empty only at
/// level 1 — the one place an empty string deliberately means "no
/// parent" rather than "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Globally stable id, e.g. `github:pull_request:acme/widgets:42`
    pub id: String,

    /// Tree depth: 1 (source), 2 (container), 3 (leaf)
    pub level: u8,

    /// Id of the level-(n-1) node; empty at the root
    pub parent_id: String,

    /// Connector namespace (`github`, `slack`)
    pub connector_id: String,

    /// Resource kind (`source`, `repository`, `channel`, ...)
    pub resource_type: String,

    /// Short machine-friendly name
    pub name: String,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Deep link to the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Resource creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Resource last-update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Open key-value map; always carries an `enrichment_params` object
    /// (empty at the root)
    #[serde(default)]
    pub metadata: JsonObject,
}

impl Context {
    /// Read the `enrichment_params` object out of the metadata map.
    ///
    /// Returns [`Error::MissingEnrichmentParams`] when the key is absent
    /// or not an object — callers at the enrichment boundary treat that
    /// as "nothing to enrich" and hand the context back unmodified.
    pub fn enrichment_params(&self) -> Result<&JsonObject> {
        self.metadata
            .get(ENRICHMENT_PARAMS_KEY)
            .and_then(JsonValue::as_object)
            .ok_or(Error::MissingEnrichmentParams)
    }

    /// Look up a single string parameter from `enrichment_params`.
    pub fn enrichment_param(&self, key: &str) -> Result<&str> {
        let value = self
            .enrichment_params()?
            .get(key)
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        if value.is_empty() {
            return Err(Error::config(format!(
                "{key} not found in enrichment_params"
            )));
        }
        Ok(value)
    }
}

/// Build the metadata map for a freshly generated context.
pub fn metadata_with_params(params: &[(&str, &str)]) -> JsonObject {
    let mut enrichment = JsonObject::new();
    for (key, value) in params {
        enrichment.insert((*key).to_string(), JsonValue::String((*value).to_string()));
    }
    let mut metadata = JsonObject::new();
    metadata.insert(
        ENRICHMENT_PARAMS_KEY.to_string(),
        JsonValue::Object(enrichment),
    );
    metadata
}

// ============================================================================
// Activity
// ============================================================================

/// One normalized occurrence of a vendor event.
///
/// Produced once by a connector's transformer and immutable thereafter.
/// `contexts` is ordered root-first: length 2 for container-level events
/// (push, delete), 3 for leaf-level events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// `<connectorId>:<vendorEventId>`
    pub id: String,

    /// Closed per-connector vocabulary (`push`, `pull_request`, `message`, ...)
    pub activity_type: String,

    /// Human-readable one-liner
    pub title: String,

    /// Longer body, when the vendor event carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Deep link to the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Event time, normalized to UTC
    pub timestamp: DateTime<Utc>,

    /// Connector namespace
    pub source: String,

    /// Vendor-specific fields for this activity type
    #[serde(default)]
    pub metadata: JsonObject,

    /// Ownership chain, root-first
    pub contexts: Vec<Context>,
}

// ============================================================================
// Id Builders
// ============================================================================

/// Build a stable hierarchical id by colon-joining the connector
/// namespace, resource type and each non-empty key in order.
pub fn make_id<'a>(
    namespace: &str,
    resource_type: &str,
    keys: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut id = format!("{namespace}:{resource_type}");
    for key in keys {
        if !key.is_empty() {
            id.push(':');
            id.push_str(key);
        }
    }
    id
}

/// Build an activity id from the connector namespace and the vendor's
/// already-unique event id.
pub fn make_activity_id(namespace: &str, event_id: &str) -> String {
    format!("{namespace}:{event_id}")
}
