//! Error types for pulse-connectors
//!
//! This module defines the error hierarchy for both connectors.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors split into two propagation classes: pipeline errors (config,
//! date parsing, vendor/HTTP failures) abort the whole call, while
//! item-level errors (unsupported event kind, missing timestamp, missing
//! enrichment params) are skippable — callers log them and continue with
//! the remaining items.

use thiserror::Error;

/// The main error type for pulse-connectors
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid allow pattern '{pattern}': at most one '*' per segment is supported")]
    InvalidPattern { pattern: String },

    #[error("Invalid target date '{input}': expected RFC3339 or YYYY-MM-DD")]
    InvalidDateFormat { input: String },

    // ============================================================================
    // HTTP / Vendor Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Vendor API error: {message}")]
    VendorApi { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Malformed vendor payload: {message}")]
    MalformedPayload { message: String },

    // ============================================================================
    // Item-Level Errors (skippable)
    // ============================================================================
    #[error("Unsupported event type: {kind}")]
    UnsupportedEventType { kind: String },

    #[error("Event is missing a usable timestamp: {message}")]
    MissingTimestamp { message: String },

    #[error("Context metadata has no enrichment_params")]
    MissingEnrichmentParams,

    #[error("Unsupported context type: {resource_type}")]
    UnsupportedContextType { resource_type: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a vendor API error
    pub fn vendor(message: impl Into<String>) -> Self {
        Self::VendorApi {
            message: message.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    /// Create an unsupported event type error
    pub fn unsupported_event(kind: impl Into<String>) -> Self {
        Self::UnsupportedEventType { kind: kind.into() }
    }

    /// Create a missing timestamp error
    pub fn missing_timestamp(message: impl Into<String>) -> Self {
        Self::MissingTimestamp {
            message: message.into(),
        }
    }

    /// Check if this error only affects a single item.
    ///
    /// Skippable errors never fail a whole fetch: the offending event or
    /// context is logged and dropped while its siblings keep processing.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedEventType { .. }
                | Error::MissingTimestamp { .. }
                | Error::MissingEnrichmentParams
                | Error::MalformedPayload { .. }
        )
    }
}

/// Result type alias for pulse-connectors
pub type Result<T> = std::result::Result<T, Error>;
