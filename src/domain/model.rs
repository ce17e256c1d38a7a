use serde::{Deserialize, Serialize};

/// WGS84 point, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A bookable club, loaded once from configuration and immutable afterwards.
/// `id` is the opaque tenant identifier the upstream feed expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub link: String,
    pub zone: String,
    pub coordinates: Option<Coordinates>,
}

/// One court entry as returned by a venue feed. Feeds are not guaranteed
/// complete, so every field is optional and absent data is skipped rather
/// than rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCourt {
    pub resource_id: Option<String>,
    #[serde(default)]
    pub slots: Vec<RawSlot>,
}

/// One raw slot inside a court entry: feed-clock start time ("HH:MM:SS"),
/// duration in minutes and a price string with a currency suffix.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSlot {
    pub start_time: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<String>,
}

/// Canonical slot after normalization. Value object; its identity is the
/// natural key (venue_name, local_start_time, price_total), which is also
/// what favorite matching relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub venue_id: String,
    pub venue_name: String,
    pub link: String,
    pub zone: String,
    pub coordinates: Option<Coordinates>,
    pub court_id: Option<String>,
    /// Venue-local wall clock, zero-padded "HH:MM".
    pub local_start_time: String,
    pub duration_minutes: u32,
    pub price_total: f64,
    pub price_per_person: f64,
}

impl Slot {
    pub fn natural_key(&self) -> String {
        natural_key(&self.venue_name, &self.local_start_time, self.price_total)
    }
}

/// Shared key format for slot/favorite matching. Price is fixed to two
/// decimals so that 300 and 300.00 produce the same key.
pub fn natural_key(venue_name: &str, local_start_time: &str, price_total: f64) -> String {
    format!("{}|{}|{:.2}", venue_name, local_start_time, price_total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Time,
    Distance,
}

/// User constraints for one search. Times are inclusive wall-clock bounds
/// ("HH:MM"); duration is an exact match, not a minimum; the budget is per
/// person and denormalized to a total before price comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub date: chrono::NaiveDate,
    pub min_start_time: String,
    pub max_start_time: Option<String>,
    pub duration_minutes: u32,
    pub budget_per_person: f64,
    pub person_count: u32,
    pub venue_filter: Option<String>,
    pub zone_filter: Option<String>,
    pub max_distance_km: Option<f64>,
    #[serde(default)]
    pub sort_key: SortKey,
}

/// Persisted snapshot of a slot the user marked as favorite. Only the
/// natural-key fields matter for the staleness check; the link is carried
/// for the presentation layer. The availability flag is recomputed every
/// check and never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub venue_name: String,
    pub local_start_time: String,
    pub price_total: f64,
    pub link: Option<String>,
}

impl FavoriteEntry {
    pub fn natural_key(&self) -> String {
        natural_key(&self.venue_name, &self.local_start_time, self.price_total)
    }
}
