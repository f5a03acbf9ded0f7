//! Target-date window and per-page date filtering
//!
//! A fetch is bounded to a single UTC day. [`DateWindow::parse`] turns
//! the caller's target date (RFC3339 or plain `YYYY-MM-DD`) into the
//! `[00:00:00.000000000, 23:59:59.999999999]` UTC window, and
//! [`filter_page`] applies it to one page of vendor events, reporting
//! whether pagination can stop.
//!
//! Events sit exactly on the window boundary are excluded: containment
//! is strict on both ends, matching the upstream behavior consumers
//! already depend on.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{Error, Result};

/// A single UTC day expressed as an inclusive-looking, strictly-compared
/// `[start, end]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// 00:00:00.000000000 UTC of the target day
    pub start: DateTime<Utc>,
    /// 23:59:59.999999999 UTC of the target day
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Parse a target date into its UTC day window.
    ///
    /// Accepts RFC3339 (`2025-12-13T10:30:00Z`) or a plain date
    /// (`2025-12-13`); anything else is [`Error::InvalidDateFormat`].
    pub fn parse(target_date: &str) -> Result<Self> {
        let date = parse_target_date(target_date)?;
        let start = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid midnight"));
        let end = Utc.from_utc_datetime(
            &date
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .expect("valid end of day"),
        );
        Ok(Self { start, end })
    }

    /// Strict containment: boundary instants are outside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant > self.start && instant < self.end
    }
}

/// Parse the target date's calendar day, trying RFC3339 first and
/// falling back to `YYYY-MM-DD`.
fn parse_target_date(target_date: &str) -> Result<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(target_date) {
        return Ok(parsed.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(target_date, "%Y-%m-%d").map_err(|_| Error::InvalidDateFormat {
        input: target_date.to_string(),
    })
}

/// Filter one page of events against the window.
///
/// `event_time` extracts each item's creation instant; items without a
/// parseable instant are dropped. Pages are vendor-ordered newest-first,
/// so the first item older than the window start proves every later
/// item (and every later page) is out of range — the scan ends there
/// and the second return value signals that pagination can stop.
pub fn filter_page<T>(
    items: Vec<T>,
    window: &DateWindow,
    event_time: impl Fn(&T) -> Option<DateTime<Utc>>,
) -> (Vec<T>, bool) {
    let mut kept = Vec::new();
    let mut should_stop = false;

    for item in items {
        let Some(instant) = event_time(&item) else {
            continue;
        };

        if instant < window.start {
            should_stop = true;
            break;
        }
        if window.contains(instant) {
            kept.push(item);
        }
    }

    (kept, should_stop)
}

#[cfg(test)]
mod tests;
