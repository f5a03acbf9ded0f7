//! GitHub activity fetching
//!
//! Drives the paginated events API through the injected [`EventsApi`],
//! bounds the scan to the target day, filters by repository allow
//! patterns and transforms what survives. A vendor error on any page
//! aborts the run; a bad individual event only costs that event.

use tracing::{debug, info};

use super::api::EventsApi;
use super::config::FetchConfig;
use super::event::RawEvent;
use super::transform::transform_event;
use crate::daterange::{filter_page, DateWindow};
use crate::error::Result;
use crate::model::Activity;
use crate::pattern::matches_any_pattern;

/// The events API serves at most 300 events: 3 pages of 100.
const MAX_EVENT_PAGES: u32 = 3;

/// Fetches and normalizes GitHub activity for one user and day
pub struct ActivityFetcher<'a> {
    api: &'a dyn EventsApi,
    config: FetchConfig,
    window: DateWindow,
}

impl std::fmt::Debug for ActivityFetcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityFetcher")
            .field("config", &self.config)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl<'a> ActivityFetcher<'a> {
    /// Create a fetcher for a validated config and target date.
    pub fn new(api: &'a dyn EventsApi, config: FetchConfig, target_date: &str) -> Result<Self> {
        let window = DateWindow::parse(target_date)?;
        Ok(Self {
            api,
            config,
            window,
        })
    }

    /// Run the full fetch–filter–transform pipeline.
    pub async fn fetch_activities(&self) -> Result<Vec<Activity>> {
        info!("Starting to fetch GitHub activities");

        let all_events = self.fetch_all_events().await?;
        info!("Fetched {} events", all_events.len());

        let filtered = self.filter_by_repository(all_events);
        info!("After repository filtering: {} events", filtered.len());

        let mut activities = Vec::new();
        for event in &filtered {
            match transform_event(event) {
                Ok(activity) => activities.push(activity),
                Err(err) => debug!("Skipping event {}: {err}", event.id),
            }
        }

        info!("Finished fetching activities");
        Ok(activities)
    }

    /// Page through the events API until the day is covered.
    ///
    /// Stops on an empty page, on the date filter's signal that the
    /// feed has scrolled past the target day, or at the vendor's
    /// 3-page ceiling — whichever comes first.
    async fn fetch_all_events(&self) -> Result<Vec<RawEvent>> {
        let mut all_events = Vec::new();

        for page in 1..=MAX_EVENT_PAGES {
            let events = self
                .api
                .list_events(&self.config.token, &self.config.username, page)
                .await?;

            if events.is_empty() {
                debug!("No more events found at page {page}, stopping pagination");
                break;
            }

            let fetched = events.len();
            let (kept, should_stop) =
                filter_page(events, &self.window, RawEvent::timestamp);
            debug!("Page {page}: {fetched} events fetched, {} kept", kept.len());
            all_events.extend(kept);

            if should_stop {
                debug!("Reached events outside date range, stopping pagination");
                break;
            }
        }

        Ok(all_events)
    }

    /// Keep only events whose repository passes the allow patterns.
    ///
    /// Events without a repository reference cannot be matched and are
    /// dropped whenever a restriction is configured.
    fn filter_by_repository(&self, events: Vec<RawEvent>) -> Vec<RawEvent> {
        if self.config.repository_patterns.is_empty() {
            return events;
        }

        events
            .into_iter()
            .filter(|event| {
                event.repo_name().is_some_and(|name| {
                    matches_any_pattern(name, &self.config.repository_patterns)
                })
            })
            .collect()
    }
}
