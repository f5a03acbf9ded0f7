//! # Pulse Connectors
//!
//! Activity source connectors that pull events from GitHub and Slack
//! and normalize them into a vendor-neutral model: an [`Activity`] per
//! vendor event, each carrying an ordered chain of hierarchical
//! [`Context`] nodes (source → container → leaf).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pulse_connectors::{Connector, GithubConnector};
//!
//! #[tokio::main]
//! async fn main() -> pulse_connectors::Result<()> {
//!     let connector = GithubConnector::new();
//!
//!     let config = serde_json::json!({
//!         "credential_personal_access_token": "ghp_...",
//!         "username": "octocat",
//!         "repository_patterns": ["acme/*"]
//!     });
//!
//!     // Check credentials
//!     let status = connector.check(&config).await?;
//!
//!     // Fetch one day of normalized activity
//!     let activities = connector.fetch_activities(&config, "2025-12-13").await?;
//!
//!     // Later: enrich a single context on demand
//!     let context = activities[0].contexts[1].clone();
//!     let enriched = connector.enrich_context(context, &config).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Connector Interface                        │
//! │  spec() → ConnectorSpec      check() → CheckResult              │
//! │  fetch_activities(config, date) → Vec<Activity>                 │
//! │  enrich_context(context, config) → Context                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬──────────────┬┴─────────────┬───────────────────┐
//! │    Fetch     │    Filter    │  Transform   │      Enrich       │
//! ├──────────────┼──────────────┼──────────────┼───────────────────┤
//! │ Paged events │ Date window  │ Event kind → │ Per resource type │
//! │ Paged search │ Allow globs  │ Activity +   │ re-fetch and      │
//! │ (sequential) │ (stop early) │ Context tree │ overwrite fields  │
//! └──────────────┴──────────────┴──────────────┴───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connectors
pub mod error;

/// Common types and type aliases
pub mod types;

/// Normalized Activity/Context model and id builders
pub mod model;

/// Glob-style allow-list matching
pub mod pattern;

/// Target-date window and page filtering
pub mod daterange;

/// Config extraction helpers
pub mod config;

/// HTTP client shared by the vendor clients
pub mod http;

/// Connector trait and surface types
pub mod connector;

/// GitHub activity connector
pub mod github;

/// Slack activity connector
pub mod slack;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use connector::{CheckResult, Connector, ConnectorSpec, PropertyConfig};
pub use error::{Error, Result};
pub use github::GithubConnector;
pub use model::{Activity, Context};
pub use slack::SlackConnector;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
