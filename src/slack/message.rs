//! Typed Slack search responses and timestamp handling
//!
//! `search.messages` wraps its hits in an envelope with the Slack-wide
//! `ok`/`error` convention and a `paging` block the fetcher uses to
//! stop. Slack timestamps are fixed-point strings
//! (`"<epochSeconds>.<fractional>"`); the fractional part carries
//! microseconds and is scaled ×1000 when converting to a real instant,
//! avoiding the precision loss of going through a float.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

// ============================================================================
// Search Response
// ============================================================================

/// `search.messages` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub ok: bool,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub messages: Option<MessagePage>,
}

impl SearchResponse {
    /// Map a `not ok` response to a vendor error.
    pub fn into_checked(self) -> Result<Self> {
        if !self.ok {
            return Err(Error::vendor(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(self)
    }
}

/// One page of search hits
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub matches: Vec<RawMessage>,

    #[serde(default)]
    pub paging: Option<Paging>,
}

/// Slack's paging block
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub pages: u32,
}

/// One message hit from the search API
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    /// Message timestamp, also the vendor's message id
    #[serde(default)]
    pub ts: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub permalink: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub team: String,

    #[serde(default)]
    pub channel: Option<ChannelRef>,
}

impl RawMessage {
    /// Parse the message timestamp, if present and well-formed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_slack_ts(&self.ts).ok()
    }

    /// The leaf grouping key: the permalink's `thread_ts` when the
    /// message is a reply, otherwise its own `ts` (thread root).
    pub fn thread_ts(&self) -> &str {
        match parse_thread_ts(&self.permalink) {
            Some(thread_ts) => thread_ts,
            None => &self.ts,
        }
    }
}

/// Channel reference on a search hit
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRef {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Timestamp Handling
// ============================================================================

/// Parse a Slack timestamp (`"1765611321.248519"`) into an instant.
///
/// The fractional part, when present, is microseconds.
pub fn parse_slack_ts(ts: &str) -> Result<DateTime<Utc>> {
    let mut parts = ts.splitn(2, '.');
    let seconds_part = parts.next().unwrap_or_default();

    let seconds: i64 = seconds_part
        .parse()
        .map_err(|_| Error::missing_timestamp(format!("unparseable slack ts '{ts}'")))?;

    let nanos: u32 = match parts.next() {
        Some(fraction) if !fraction.is_empty() => {
            let micros: u32 = fraction
                .parse()
                .map_err(|_| Error::missing_timestamp(format!("unparseable slack ts '{ts}'")))?;
            micros * 1000
        }
        _ => 0,
    };

    Utc.timestamp_opt(seconds, nanos)
        .single()
        .ok_or_else(|| Error::missing_timestamp(format!("slack ts '{ts}' out of range")))
}

/// Render a Slack timestamp in its permalink form:
/// `"1765611321.248519"` → `"1765611321248519"`.
pub fn format_slack_ts(ts: &str) -> String {
    ts.replace('.', "")
}

static THREAD_TS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"thread_ts=([0-9.]+)").expect("valid thread_ts regex"));

/// Extract the `thread_ts` query value from a message permalink.
///
/// Example: `https://acme.slack.com/archives/C01234/p1765613227980829?thread_ts=1765613134.990399`
/// yields `1765613134.990399`; a permalink without the parameter yields
/// `None` (the message is its own thread root).
pub fn parse_thread_ts(permalink: &str) -> Option<&str> {
    THREAD_TS_RE
        .captures(permalink)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
