use crate::domain::model::{RawSlot, Slot, Venue};
use crate::utils::error::{Result, ScoutError};

/// Turns one raw feed slot into a canonical [`Slot`].
///
/// Two feed quirks are corrected here: start times arrive in the feed's own
/// fixed clock (local hour = raw hour minus `offset_hours`, wrapping at
/// midnight, minutes unchanged), and prices arrive as strings carrying a
/// currency suffix.
#[derive(Debug, Clone)]
pub struct SlotNormalizer {
    offset_hours: u32,
    currency_suffix: String,
}

impl SlotNormalizer {
    pub fn new(offset_hours: u32, currency_suffix: &str) -> Self {
        Self {
            offset_hours: offset_hours % 24,
            currency_suffix: currency_suffix.to_string(),
        }
    }

    /// Normalize one raw slot for the given venue. Returns `Ok(None)` when the
    /// record is missing its time, duration or price (incomplete feed data is
    /// skipped, not an error), and an error for a malformed price or a person
    /// count below 1.
    pub fn normalize(
        &self,
        venue: &Venue,
        court_id: Option<&str>,
        raw: &RawSlot,
        person_count: u32,
    ) -> Result<Option<Slot>> {
        let (start_time, duration, price) = match (&raw.start_time, raw.duration, &raw.price) {
            (Some(s), Some(d), Some(p)) => (s, d, p),
            _ => return Ok(None),
        };

        let local_start_time = match self.local_time(start_time) {
            Some(t) => t,
            None => return Ok(None),
        };

        let price_total = self.parse_price(price)?;
        let price_per_person = per_person_price(price_total, person_count)?;

        Ok(Some(Slot {
            venue_id: venue.id.clone(),
            venue_name: venue.name.clone(),
            link: venue.link.clone(),
            zone: venue.zone.clone(),
            coordinates: venue.coordinates,
            court_id: court_id.map(|c| c.to_string()),
            local_start_time,
            duration_minutes: duration,
            price_total,
            price_per_person,
        }))
    }

    /// "HH:MM:SS" in feed clock -> zero-padded "HH:MM" venue-local.
    fn local_time(&self, start_time: &str) -> Option<String> {
        let mut parts = start_time.split(':');
        let hour: u32 = parts.next()?.parse().ok()?;
        let minute: u32 = parts.next()?.parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        let local_hour = (hour + 24 - self.offset_hours) % 24;
        Some(format!("{:02}:{:02}", local_hour, minute))
    }

    fn parse_price(&self, raw: &str) -> Result<f64> {
        let amount = raw
            .strip_suffix(self.currency_suffix.as_str())
            .unwrap_or(raw)
            .trim();
        amount
            .parse::<f64>()
            .map_err(|_| ScoutError::MalformedPriceError {
                value: raw.to_string(),
            })
    }
}

/// `round(total / persons, 2)`; rejects a person count below 1.
pub fn per_person_price(price_total: f64, person_count: u32) -> Result<f64> {
    if person_count < 1 {
        return Err(ScoutError::InvalidPersonCountError(person_count));
    }
    let per_person = price_total / person_count as f64;
    Ok((per_person * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue() -> Venue {
        Venue {
            id: "tenant-a".to_string(),
            name: "Club A".to_string(),
            link: "https://example.com/club-a".to_string(),
            zone: "Centro".to_string(),
            coordinates: None,
        }
    }

    fn raw(start: &str, duration: u32, price: &str) -> RawSlot {
        RawSlot {
            start_time: Some(start.to_string()),
            duration: Some(duration),
            price: Some(price.to_string()),
        }
    }

    #[test]
    fn test_time_correction() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        let slot = normalizer
            .normalize(&venue(), None, &raw("19:30:00", 60, "300 MXN"), 4)
            .unwrap()
            .unwrap();
        assert_eq!(slot.local_start_time, "13:30");
    }

    #[test]
    fn test_time_correction_wraps_at_midnight() {
        // A feed entry at 02:00 folds into the previous local evening.
        let normalizer = SlotNormalizer::new(6, " MXN");
        let slot = normalizer
            .normalize(&venue(), None, &raw("02:00:00", 60, "300 MXN"), 4)
            .unwrap()
            .unwrap();
        assert_eq!(slot.local_start_time, "20:00");
    }

    #[test]
    fn test_price_parsing_and_per_person() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        let slot = normalizer
            .normalize(&venue(), Some("court-1"), &raw("19:00:00", 90, "380 MXN"), 4)
            .unwrap()
            .unwrap();
        assert_eq!(slot.price_total, 380.0);
        assert_eq!(slot.price_per_person, 95.0);
        assert_eq!(slot.court_id.as_deref(), Some("court-1"));
    }

    #[test]
    fn test_per_person_rounds_to_two_decimals() {
        assert_eq!(per_person_price(100.0, 3).unwrap(), 33.33);
        assert_eq!(per_person_price(200.0, 3).unwrap(), 66.67);
    }

    #[test]
    fn test_malformed_price_is_error() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        let result = normalizer.normalize(&venue(), None, &raw("19:00:00", 60, "free MXN"), 2);
        assert!(matches!(
            result,
            Err(ScoutError::MalformedPriceError { .. })
        ));
    }

    #[test]
    fn test_zero_person_count_is_error() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        let result = normalizer.normalize(&venue(), None, &raw("19:00:00", 60, "300 MXN"), 0);
        assert!(matches!(result, Err(ScoutError::InvalidPersonCountError(0))));
    }

    #[test]
    fn test_incomplete_slot_is_skipped() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        let missing_price = RawSlot {
            start_time: Some("19:00:00".to_string()),
            duration: Some(60),
            price: None,
        };
        assert!(normalizer
            .normalize(&venue(), None, &missing_price, 4)
            .unwrap()
            .is_none());

        let missing_time = RawSlot {
            start_time: None,
            duration: Some(60),
            price: Some("300 MXN".to_string()),
        };
        assert!(normalizer
            .normalize(&venue(), None, &missing_time, 4)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_garbled_time_is_skipped() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        assert!(normalizer
            .normalize(&venue(), None, &raw("25:99:00", 60, "300 MXN"), 4)
            .unwrap()
            .is_none());
        assert!(normalizer
            .normalize(&venue(), None, &raw("soon", 60, "300 MXN"), 4)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_price_without_suffix_still_parses() {
        let normalizer = SlotNormalizer::new(6, " MXN");
        let slot = normalizer
            .normalize(&venue(), None, &raw("19:00:00", 60, "250.50"), 2)
            .unwrap()
            .unwrap();
        assert_eq!(slot.price_total, 250.5);
        assert_eq!(slot.price_per_person, 125.25);
    }
}
