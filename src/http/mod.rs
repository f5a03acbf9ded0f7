//! HTTP client module
//!
//! A thin wrapper over reqwest shared by both vendor clients: base-URL
//! joining, default headers, per-request query/header configuration and
//! uniform error mapping for non-2xx responses. Authentication is plain
//! bearer-token injection; anything fancier lives with the caller.

mod client;

pub use client::{AuthScheme, HttpClient, HttpClientConfig, RequestConfig};
