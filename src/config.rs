//! Config extraction helpers
//!
//! Connector configs arrive from the host as loose JSON objects. These
//! helpers pull fields out with the shared policy that a missing field
//! and an empty string are the same failure, named after the offending
//! key.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Extract a required non-empty string field.
pub fn required_string(config: &JsonValue, key: &str) -> Result<String> {
    let value = config
        .get(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default();
    if value.is_empty() {
        return Err(Error::missing_field(key));
    }
    Ok(value.to_string())
}

/// Extract an optional list of strings, dropping non-string and empty
/// entries.
pub fn string_list(config: &JsonValue, key: &str) -> Vec<String> {
    config
        .get(key)
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
