use crate::config::venues::FeedConfig;
use crate::domain::model::{RawCourt, Venue};
use crate::domain::ports::AvailabilitySource;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::Client;

/// Availability source backed by the real upstream HTTP feed: one GET per
/// venue, parameterized by sport, feed-clock range and tenant id.
pub struct HttpFeed {
    client: Client,
    endpoint: String,
    sport_id: String,
}

impl HttpFeed {
    pub fn new(feed: &FeedConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: feed.endpoint.clone(),
            sport_id: feed.sport_id.clone(),
        }
    }
}

#[async_trait]
impl AvailabilitySource for HttpFeed {
    async fn fetch_courts(
        &self,
        venue: &Venue,
        start_min: &str,
        start_max: &str,
    ) -> Result<Vec<RawCourt>> {
        tracing::debug!(venue = %venue.name, start_min, start_max, "requesting availability");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("sport_id", self.sport_id.as_str()),
                ("start_min", start_min),
                ("start_max", start_max),
                ("tenant_id", venue.id.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScoutError::UpstreamStatusError {
                venue: venue.name.clone(),
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let items = match body {
            serde_json::Value::Array(items) => items,
            other => {
                // Feeds occasionally answer with an error object instead of
                // the court array; that venue simply has no data this cycle.
                tracing::warn!(venue = %venue.name, body = %other, "non-array feed response, treating as empty");
                return Ok(Vec::new());
            }
        };

        // Court records are decoded individually so one malformed entry does
        // not discard the rest of the venue's response.
        let mut courts = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<RawCourt>(item) {
                Ok(court) => courts.push(court),
                Err(e) => {
                    tracing::debug!(venue = %venue.name, error = %e, "skipping undecodable court record")
                }
            }
        }
        Ok(courts)
    }
}
