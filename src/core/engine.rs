use crate::config::venues::AppConfig;
use crate::core::aggregate::Aggregator;
use crate::core::{favorites, search};
use crate::domain::model::{
    Coordinates, FavoriteEntry, SearchCriteria, Slot, SortKey, Venue,
};
use crate::domain::ports::AvailabilitySource;
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

/// Wires the aggregation-filter-rank pipeline together behind the service
/// boundary: search, venue listing and the favorites staleness check.
pub struct SearchEngine {
    venues: Vec<Venue>,
    aggregator: Aggregator,
}

impl SearchEngine {
    pub fn new(config: &AppConfig, source: Arc<dyn AvailabilitySource>) -> Self {
        Self {
            venues: config.venues(),
            aggregator: Aggregator::new(source, &config.feed),
        }
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Run one search: validate, aggregate one day across all venues, then
    /// filter and rank. Criteria problems surface before any upstream call.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        user_location: Option<Coordinates>,
    ) -> Result<Vec<Slot>> {
        search::validate_criteria(criteria)?;

        let slots = self
            .aggregator
            .fetch_day(&self.venues, criteria.date, criteria.person_count)
            .await;
        tracing::info!(
            candidates = slots.len(),
            date = %criteria.date,
            "running filter and rank"
        );

        Ok(search::rank(slots, criteria, user_location))
    }

    /// Diff persisted favorites against a fresh full-day snapshot.
    ///
    /// The snapshot pass is otherwise maximally permissive (full day, no
    /// budget cap, no venue/zone/distance constraints) but fixed to one
    /// duration class per check; a favorite of a different duration is
    /// therefore reported unavailable. Known limitation of the check, kept
    /// as-is rather than guessed around.
    pub async fn check_favorites(
        &self,
        date: NaiveDate,
        duration_minutes: u32,
        favorites: &[FavoriteEntry],
    ) -> Result<HashMap<String, bool>> {
        let permissive = SearchCriteria {
            date,
            min_start_time: "00:00".to_string(),
            max_start_time: None,
            duration_minutes,
            budget_per_person: f64::MAX,
            person_count: 1,
            venue_filter: None,
            zone_filter: None,
            max_distance_km: None,
            sort_key: SortKey::Time,
        };
        search::validate_criteria(&permissive)?;

        let slots = self
            .aggregator
            .fetch_day(&self.venues, date, permissive.person_count)
            .await;
        let snapshot = search::rank(slots, &permissive, None);

        Ok(favorites::check_availability(favorites, &snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawCourt, RawSlot};
    use crate::utils::error::ScoutError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AvailabilitySource for CountingSource {
        async fn fetch_courts(
            &self,
            _venue: &Venue,
            _start_min: &str,
            _start_max: &str,
        ) -> Result<Vec<RawCourt>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![RawCourt {
                resource_id: Some("court-1".to_string()),
                slots: vec![RawSlot {
                    start_time: Some("19:00:00".to_string()),
                    duration: Some(60),
                    price: Some("300 MXN".to_string()),
                }],
            }])
        }
    }

    fn config() -> AppConfig {
        crate::config::venues::AppConfig::from_toml_str(
            r#"
            [feed]
            endpoint = "https://api.example.com/v1/availability"

            [[venue]]
            id = "tenant-a"
            name = "Club A"
            link = "https://example.com/club-a"
            zone = "Centro"
            "#,
        )
        .unwrap()
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
            min_start_time: "00:00".to_string(),
            max_start_time: None,
            duration_minutes: 60,
            budget_per_person: 100.0,
            person_count: 4,
            venue_filter: None,
            zone_filter: None,
            max_distance_km: None,
            sort_key: SortKey::Price,
        }
    }

    #[tokio::test]
    async fn test_invalid_criteria_short_circuits_before_any_fetch() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let engine = SearchEngine::new(&config(), source.clone());

        let mut bad = criteria();
        bad.person_count = 0;
        let result = engine.search(&bad, None).await;

        assert!(matches!(
            result,
            Err(ScoutError::InvalidCriteriaError { .. })
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_end_to_end_over_stub_source() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let engine = SearchEngine::new(&config(), source.clone());

        let results = engine.search(&criteria(), None).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].local_start_time, "13:00");
        assert_eq!(results[0].price_per_person, 75.0);
    }

    #[tokio::test]
    async fn test_check_favorites_matches_snapshot() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let engine = SearchEngine::new(&config(), source);
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

        let favorites = vec![
            FavoriteEntry {
                venue_name: "Club A".to_string(),
                local_start_time: "13:00".to_string(),
                price_total: 300.0,
                link: None,
            },
            FavoriteEntry {
                venue_name: "Club A".to_string(),
                local_start_time: "17:00".to_string(),
                price_total: 300.0,
                link: None,
            },
        ];

        let availability = engine.check_favorites(date, 60, &favorites).await.unwrap();
        assert_eq!(availability.get("Club A|13:00|300.00"), Some(&true));
        assert_eq!(availability.get("Club A|17:00|300.00"), Some(&false));
    }
}
