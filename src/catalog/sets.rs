// src/catalog/sets.rs

use chrono::Datelike;

use super::SetSummary;

/// Codes of the sets released in or after `min_year` whose type is exactly
/// `set_type`. Sets without a release date are skipped. Listing order is kept.
pub fn eligible_set_codes(sets: &[SetSummary], min_year: i32, set_type: &str) -> Vec<String> {
    sets.iter()
        .filter(|s| s.released_at.map_or(false, |d| d.year() >= min_year))
        .filter(|s| s.set_type == set_type)
        .map(|s| s.code.clone())
        .collect()
}
