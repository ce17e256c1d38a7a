use crate::domain::model::{Coordinates, Venue};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Startup configuration: one upstream feed description plus the static
/// venue list. Loaded once from TOML, shared read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub feed: FeedConfig,
    #[serde(rename = "venue")]
    pub venues: Vec<VenueConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub endpoint: String,

    #[serde(default = "default_sport_id")]
    pub sport_id: String,

    /// Hours to subtract from the feed's wall clock to get venue-local time.
    /// The feed reports one fixed foreign offset; a single number per feed is
    /// a deliberate simplification tied to one market, carried here so it
    /// stays a testable parameter instead of ambient state.
    #[serde(default = "default_offset_hours")]
    pub offset_hours: u32,

    /// Currency suffix the feed appends to price strings, e.g. " MXN".
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,

    /// Feed-clock hour at which the one-day fetch window starts. 13:00 feed
    /// time minus the 6h offset brackets one full local day.
    #[serde(default = "default_window_hour")]
    pub window_hour: u32,

    /// Per-venue fetch timeout. A timed-out venue contributes zero slots.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub id: String,
    pub name: String,
    pub link: String,
    pub zone: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

fn default_sport_id() -> String {
    "PADEL".to_string()
}

fn default_offset_hours() -> u32 {
    6
}

fn default_currency_suffix() -> String {
    " MXN".to_string()
}

fn default_window_hour() -> u32 {
    13
}

fn default_timeout_seconds() -> u64 {
    5
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Materialize the venue list for the aggregator.
    pub fn venues(&self) -> Vec<Venue> {
        self.venues
            .iter()
            .map(|v| Venue {
                id: v.id.clone(),
                name: v.name.clone(),
                link: v.link.clone(),
                zone: v.zone.clone(),
                coordinates: match (v.lat, v.lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
                    _ => None,
                },
            })
            .collect()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("feed.endpoint", &self.feed.endpoint)?;
        validate_non_empty_string("feed.sport_id", &self.feed.sport_id)?;
        validate_range("feed.offset_hours", self.feed.offset_hours, 0, 23)?;
        validate_range("feed.window_hour", self.feed.window_hour, 0, 23)?;
        validate_range("feed.timeout_seconds", self.feed.timeout_seconds, 1, 60)?;

        if self.venues.is_empty() {
            return Err(ScoutError::MissingConfigError {
                field: "venue".to_string(),
            });
        }

        for venue in &self.venues {
            validate_non_empty_string("venue.id", &venue.id)?;
            validate_non_empty_string("venue.name", &venue.name)?;
            validate_url("venue.link", &venue.link)?;
            if let Some(lat) = venue.lat {
                validate_range("venue.lat", lat, -90.0, 90.0)?;
            }
            if let Some(lon) = venue.lon {
                validate_range("venue.lon", lon, -180.0, 180.0)?;
            }
        }

        Ok(())
    }
}
