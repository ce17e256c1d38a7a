use crate::config::venues::FeedConfig;
use crate::core::normalize::SlotNormalizer;
use crate::domain::model::{Slot, Venue};
use crate::domain::ports::AvailabilitySource;
use chrono::{Days, NaiveDate};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Fans out to every configured venue and merges whatever came back.
///
/// The aggregate result is best-effort over the sources that responded: a
/// venue that errors, times out or answers with a malformed body contributes
/// zero slots and never aborts the whole pass.
pub struct Aggregator {
    source: Arc<dyn AvailabilitySource>,
    normalizer: SlotNormalizer,
    window_hour: u32,
    fetch_timeout: Duration,
}

impl Aggregator {
    pub fn new(source: Arc<dyn AvailabilitySource>, feed: &FeedConfig) -> Self {
        Self {
            source,
            normalizer: SlotNormalizer::new(feed.offset_hours, &feed.currency_suffix),
            window_hour: feed.window_hour % 24,
            fetch_timeout: Duration::from_secs(feed.timeout_seconds),
        }
    }

    /// Fetch one full local day of availability across all venues. The range
    /// is expressed in the feed's clock: `[date window_hour, date+1
    /// window_hour)` brackets the local day given the fixed feed offset.
    pub async fn fetch_day(
        &self,
        venues: &[Venue],
        date: NaiveDate,
        person_count: u32,
    ) -> Vec<Slot> {
        let start_min = format!("{}T{:02}:00:00", date, self.window_hour);
        let next_day = date + Days::new(1);
        let start_max = format!("{}T{:02}:00:00", next_day, self.window_hour);

        let fetches = venues
            .iter()
            .map(|venue| self.fetch_venue(venue, &start_min, &start_max, person_count));
        let per_venue = join_all(fetches).await;

        let slots: Vec<Slot> = per_venue.into_iter().flatten().collect();
        tracing::info!(date = %date, total = slots.len(), "availability aggregated");
        slots
    }

    /// One venue's contribution; failures are isolated here.
    async fn fetch_venue(
        &self,
        venue: &Venue,
        start_min: &str,
        start_max: &str,
        person_count: u32,
    ) -> Vec<Slot> {
        let courts = match timeout(
            self.fetch_timeout,
            self.source.fetch_courts(venue, start_min, start_max),
        )
        .await
        {
            Ok(Ok(courts)) => courts,
            Ok(Err(e)) => {
                tracing::warn!(venue = %venue.name, error = %e, "venue fetch failed, contributing zero slots");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!(venue = %venue.name, timeout = ?self.fetch_timeout, "venue fetch timed out, contributing zero slots");
                return Vec::new();
            }
        };

        let mut slots = Vec::new();
        for court in &courts {
            for raw in &court.slots {
                match self
                    .normalizer
                    .normalize(venue, court.resource_id.as_deref(), raw, person_count)
                {
                    Ok(Some(slot)) => slots.push(slot),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::debug!(venue = %venue.name, error = %e, "skipping malformed slot")
                    }
                }
            }
        }

        tracing::debug!(venue = %venue.name, count = slots.len(), "venue availability fetched");
        slots
    }
}
