use crate::core::geo::distance_km;
use crate::domain::model::{Coordinates, SearchCriteria, Slot, SortKey};
use crate::utils::error::{Result, ScoutError};
use std::cmp::Ordering;

/// Reject unusable criteria before any upstream call is made.
pub fn validate_criteria(criteria: &SearchCriteria) -> Result<()> {
    if criteria.person_count < 1 {
        return Err(ScoutError::InvalidCriteriaError {
            field: "person_count".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if criteria.duration_minutes == 0 {
        return Err(ScoutError::InvalidCriteriaError {
            field: "duration_minutes".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if criteria.budget_per_person < 0.0 || !criteria.budget_per_person.is_finite() {
        return Err(ScoutError::InvalidCriteriaError {
            field: "budget_per_person".to_string(),
            reason: "must be a non-negative amount".to_string(),
        });
    }
    if minutes_since_midnight(&criteria.min_start_time).is_none() {
        return Err(ScoutError::InvalidCriteriaError {
            field: "min_start_time".to_string(),
            reason: format!("'{}' is not a valid HH:MM time", criteria.min_start_time),
        });
    }
    if let Some(max) = &criteria.max_start_time {
        if minutes_since_midnight(max).is_none() {
            return Err(ScoutError::InvalidCriteriaError {
                field: "max_start_time".to_string(),
                reason: format!("'{}' is not a valid HH:MM time", max),
            });
        }
    }
    if let Some(max_km) = criteria.max_distance_km {
        if max_km < 0.0 || !max_km.is_finite() {
            return Err(ScoutError::InvalidCriteriaError {
                field: "max_distance_km".to_string(),
                reason: "must be a non-negative distance".to_string(),
            });
        }
    }
    Ok(())
}

/// Apply all criteria predicates and order the survivors. Pure: the same
/// input always yields the same list.
///
/// Times are compared as minutes since midnight, never as raw strings. When
/// no user location is known the distance predicate keeps everything and a
/// `distance` sort falls back to the price ordering.
pub fn rank(slots: Vec<Slot>, criteria: &SearchCriteria, user: Option<Coordinates>) -> Vec<Slot> {
    let min_minutes = minutes_since_midnight(&criteria.min_start_time).unwrap_or(0);
    let max_minutes = criteria
        .max_start_time
        .as_deref()
        .and_then(minutes_since_midnight);
    let budget_total = criteria.budget_per_person * criteria.person_count as f64;

    let mut results: Vec<Slot> = slots
        .into_iter()
        .filter(|slot| {
            let start = match minutes_since_midnight(&slot.local_start_time) {
                Some(m) => m,
                None => return false,
            };
            if start < min_minutes {
                return false;
            }
            if let Some(max) = max_minutes {
                if start > max {
                    return false;
                }
            }
            if slot.duration_minutes != criteria.duration_minutes {
                return false;
            }
            if slot.price_total > budget_total {
                return false;
            }
            if let Some(venue) = &criteria.venue_filter {
                if &slot.venue_name != venue {
                    return false;
                }
            }
            if let Some(zone) = &criteria.zone_filter {
                if &slot.zone != zone {
                    return false;
                }
            }
            within_max_distance(slot, criteria.max_distance_km, user)
        })
        .collect();

    let effective_sort = match criteria.sort_key {
        // Without a user location there is no distance to sort by.
        SortKey::Distance if user.is_none() => SortKey::Price,
        key => key,
    };

    match effective_sort {
        SortKey::Price => results.sort_by(cmp_price_then_time),
        SortKey::Time => results.sort_by(cmp_time),
        SortKey::Distance => results.sort_by(|a, b| cmp_distance(a, b, user)),
    }

    results
}

/// The distance predicate only ever excludes when everything needed to
/// compute a distance is present; otherwise it is a no-op.
fn within_max_distance(slot: &Slot, max_km: Option<f64>, user: Option<Coordinates>) -> bool {
    match (max_km, user, slot.coordinates) {
        (Some(max), Some(user), Some(venue)) => distance_km(user, venue) <= max,
        _ => true,
    }
}

fn cmp_price_then_time(a: &Slot, b: &Slot) -> Ordering {
    a.price_total
        .partial_cmp(&b.price_total)
        .unwrap_or(Ordering::Equal)
        .then_with(|| cmp_time(a, b))
}

fn cmp_time(a: &Slot, b: &Slot) -> Ordering {
    minutes_since_midnight(&a.local_start_time).cmp(&minutes_since_midnight(&b.local_start_time))
}

/// A comparison with missing coordinates yields no preference; the sort is
/// stable, so prior relative order survives.
fn cmp_distance(a: &Slot, b: &Slot, user: Option<Coordinates>) -> Ordering {
    let dist = |slot: &Slot| -> Option<f64> {
        match (user, slot.coordinates) {
            (Some(u), Some(v)) => Some(distance_km(u, v)),
            _ => None,
        }
    };
    match (dist(a), dist(b)) {
        (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Zero-padded "HH:MM" -> minutes since midnight. None for anything else.
pub fn minutes_since_midnight(time: &str) -> Option<u32> {
    let (h, m) = time.split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}
