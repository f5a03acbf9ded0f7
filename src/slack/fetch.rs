//! Slack activity fetching
//!
//! Pages through `search.messages` for one user and day via the
//! injected [`SearchApi`]. The search query already scopes hits to the
//! target date, but each page still runs through the shared date
//! window so boundary semantics and the early-stop signal match the
//! other connector exactly. Pagination also ends when Slack's own
//! paging block says the last page was served.

use tracing::{debug, info, warn};

use super::api::SearchApi;
use super::config::FetchConfig;
use super::context::ContextGenerator;
use super::message::RawMessage;
use super::transform::transform_message;
use crate::daterange::{filter_page, DateWindow};
use crate::error::Result;
use crate::model::Activity;
use crate::pattern::matches_any_pattern;

/// The search API refuses to page past this point.
const MAX_SEARCH_PAGES: u32 = 100;

/// Fetches and normalizes Slack messages for one user and day
pub struct ActivityFetcher<'a> {
    api: &'a dyn SearchApi,
    config: FetchConfig,
    window: DateWindow,
    query_date: String,
}

impl<'a> ActivityFetcher<'a> {
    /// Create a fetcher for a validated config and target date.
    pub fn new(api: &'a dyn SearchApi, config: FetchConfig, target_date: &str) -> Result<Self> {
        let window = DateWindow::parse(target_date)?;
        // The search query wants the plain calendar day.
        let query_date = window.start.format("%Y-%m-%d").to_string();
        Ok(Self {
            api,
            config,
            window,
            query_date,
        })
    }

    /// Run the full fetch–filter–transform pipeline.
    pub async fn fetch_activities(&self) -> Result<Vec<Activity>> {
        info!("Starting to fetch Slack messages");

        let all_messages = self.fetch_all_messages().await?;
        info!("Fetched {} messages", all_messages.len());

        let filtered = self.filter_by_channel(all_messages);
        info!("After channel filtering: {} messages", filtered.len());

        let generator = ContextGenerator::new();
        let mut activities = Vec::new();
        for message in &filtered {
            match transform_message(message, &generator) {
                Ok(activity) => activities.push(activity),
                Err(err) => warn!("Skipping message: {err}"),
            }
        }

        info!("Transformed {} activities", activities.len());
        Ok(activities)
    }

    /// Page through the search API until the day is covered.
    async fn fetch_all_messages(&self) -> Result<Vec<RawMessage>> {
        let mut all_messages = Vec::new();

        for page in 1..=MAX_SEARCH_PAGES {
            debug!("Fetching page {page}");

            let response = self
                .api
                .search_messages(
                    &self.config.token,
                    &self.config.user_id,
                    &self.query_date,
                    page,
                )
                .await?
                .into_checked()?;

            let Some(page_data) = response.messages else {
                debug!("No messages object in response, stopping pagination");
                break;
            };

            if page_data.matches.is_empty() {
                debug!("Empty matches array, stopping pagination");
                break;
            }

            let fetched = page_data.matches.len();
            let (kept, should_stop) =
                filter_page(page_data.matches, &self.window, RawMessage::timestamp);
            info!("Page {page}: {fetched} messages fetched, {} kept", kept.len());
            all_messages.extend(kept);

            if should_stop {
                debug!("Reached messages outside date range, stopping pagination");
                break;
            }

            let Some(paging) = page_data.paging else {
                break;
            };
            if paging.page >= paging.pages {
                debug!("Reached last page, stopping pagination");
                break;
            }
        }

        Ok(all_messages)
    }

    /// Keep only messages whose channel name passes the allow patterns.
    fn filter_by_channel(&self, messages: Vec<RawMessage>) -> Vec<RawMessage> {
        if self.config.channel_patterns.is_empty() {
            return messages;
        }

        messages
            .into_iter()
            .filter(|message| {
                message.channel.as_ref().is_some_and(|channel| {
                    matches_any_pattern(&channel.name, &self.config.channel_patterns)
                })
            })
            .collect()
    }
}
