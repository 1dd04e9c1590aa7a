use crate::models::{FilterConfig, Place};

/// Accepted range for a minimum-rating constraint
const RATING_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

/// Accepted range for a maximum-price constraint
const PRICE_LEVEL_RANGE: std::ops::RangeInclusive<i32> = 1..=4;

/// Check a place against a minimum rating
///
/// A place that does not report a rating cannot be shown to meet the
/// minimum, so it fails.
#[inline]
pub fn passes_min_rating(place: &Place, min_rating: f64) -> bool {
    matches!(place.rating, Some(rating) if rating >= min_rating)
}

/// Check a place against a maximum price level. Unknown price passes.
#[inline]
pub fn passes_max_price(place: &Place, max_price_level: i32) -> bool {
    match place.price_level {
        Some(level) => i32::from(level) <= max_price_level,
        None => true,
    }
}

/// Check a place against the wanted open status. Unknown status passes.
#[inline]
pub fn passes_open_status(place: &Place, is_open: bool) -> bool {
    match place.opening_hours {
        Some(open) => open == is_open,
        None => true,
    }
}

/// Keep places rated at least `min_rating`
///
/// A missing or out-of-range (outside 1-5) threshold leaves the list unchanged.
pub fn filter_by_rating(places: &[Place], min_rating: Option<f64>) -> Vec<Place> {
    match min_rating {
        Some(min) if RATING_RANGE.contains(&min) => places
            .iter()
            .filter(|place| passes_min_rating(place, min))
            .cloned()
            .collect(),
        _ => places.to_vec(),
    }
}

/// Keep places priced at most `max_price_level`
///
/// A missing or out-of-range (outside 1-4) threshold leaves the list unchanged.
pub fn filter_by_price(places: &[Place], max_price_level: Option<i32>) -> Vec<Place> {
    match max_price_level {
        Some(max) if PRICE_LEVEL_RANGE.contains(&max) => places
            .iter()
            .filter(|place| passes_max_price(place, max))
            .cloned()
            .collect(),
        _ => places.to_vec(),
    }
}

/// Keep places whose open status matches `is_open`
pub fn filter_by_open_status(places: &[Place], is_open: Option<bool>) -> Vec<Place> {
    match is_open {
        Some(wanted) => places
            .iter()
            .filter(|place| passes_open_status(place, wanted))
            .cloned()
            .collect(),
        None => places.to_vec(),
    }
}

/// Apply every filter in `config`
///
/// Stages run in a fixed order: rating, then price, then open status. Each
/// stage consumes the previous stage's output and relative order is kept.
pub fn apply_filters(places: &[Place], config: &FilterConfig) -> Vec<Place> {
    let filtered = filter_by_rating(places, config.min_rating);
    let filtered = filter_by_price(&filtered, config.max_price_level);
    filter_by_open_status(&filtered, config.is_open)
}
