use crate::domain::model::{RawCourt, Venue};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Port toward one upstream availability feed. `start_min`/`start_max` are
/// feed-clock timestamps ("YYYY-MM-DDTHH:MM:SS") bracketing the requested
/// range; implementations return the raw per-court records untouched.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn fetch_courts(
        &self,
        venue: &Venue,
        start_min: &str,
        start_max: &str,
    ) -> Result<Vec<RawCourt>>;
}
