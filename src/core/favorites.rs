use crate::domain::model::{FavoriteEntry, Slot};
use std::collections::{HashMap, HashSet};

/// Decide which persisted favorites are still present in a fresh snapshot.
///
/// Presence is an exact natural-key match (venue name, local start time,
/// price to two decimals) — no tolerance band, so any upstream price or
/// start-time drift flips a favorite to unavailable. The favorites set
/// itself is never mutated here; the map is advisory for the caller.
pub fn check_availability(
    favorites: &[FavoriteEntry],
    fresh_snapshot: &[Slot],
) -> HashMap<String, bool> {
    let present: HashSet<String> = fresh_snapshot.iter().map(|s| s.natural_key()).collect();

    favorites
        .iter()
        .map(|favorite| {
            let key = favorite.natural_key();
            let available = present.contains(&key);
            (key, available)
        })
        .collect()
}
