use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

use crate::core::distance::distance_km;
use crate::models::{LatLng, Place, SortType};

/// Order places nearest-first from `reference`
///
/// Without a usable reference point the list is returned unchanged.
pub fn sort_by_distance(places: &[Place], reference: Option<&LatLng>) -> Vec<Place> {
    let mut sorted = places.to_vec();
    sort_by_distance_in_place(&mut sorted, reference);
    sorted
}

/// Order places by rating, highest first
///
/// Equal ratings put the place with more reviews first. Places without a
/// rating go last in their original order.
pub fn sort_by_rating(places: &[Place]) -> Vec<Place> {
    let mut sorted = places.to_vec();
    sort_by_rating_in_place(&mut sorted);
    sorted
}

/// Order places open first, then closed, then unknown
pub fn sort_by_open_status(places: &[Place]) -> Vec<Place> {
    let mut sorted = places.to_vec();
    sort_by_open_status_in_place(&mut sorted);
    sorted
}

/// Order places alphabetically by name
///
/// Names are compared with the root-locale Unicode collation, so accented
/// letters sort next to their base letter and lowercase precedes uppercase.
pub fn sort_by_name(places: &[Place]) -> Vec<Place> {
    let mut sorted = places.to_vec();
    sort_by_name_in_place(&mut sorted);
    sorted
}

/// Sort by the selected criterion. `SortType::None` keeps the input order.
pub fn apply_sorting(places: &[Place], sort_type: SortType, reference: Option<&LatLng>) -> Vec<Place> {
    let mut sorted = places.to_vec();
    sort_in_place(&mut sorted, sort_type, reference);
    sorted
}

/// Dispatch to exactly one in-place sort. All sorts are stable.
pub(crate) fn sort_in_place(places: &mut [Place], sort_type: SortType, reference: Option<&LatLng>) {
    match sort_type {
        SortType::Distance => sort_by_distance_in_place(places, reference),
        SortType::Rating => sort_by_rating_in_place(places),
        SortType::OpenStatus => sort_by_open_status_in_place(places),
        SortType::Name => sort_by_name_in_place(places),
        SortType::None => {}
    }
}

fn sort_by_distance_in_place(places: &mut [Place], reference: Option<&LatLng>) {
    let Some(reference) = reference.filter(|point| point.is_usable()) else {
        return;
    };

    // Compute each distance once instead of once per comparison
    let mut keyed: Vec<(f64, usize)> = places
        .iter()
        .enumerate()
        .map(|(index, place)| (distance_km(reference, &place.position), index))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let original = places.to_vec();
    for (slot, (_, index)) in places.iter_mut().zip(keyed) {
        *slot = original[index].clone();
    }
}

fn sort_by_rating_in_place(places: &mut [Place]) {
    places.sort_by(compare_by_rating);
}

fn sort_by_open_status_in_place(places: &mut [Place]) {
    places.sort_by_key(|place| open_status_tier(place.opening_hours));
}

fn sort_by_name_in_place(places: &mut [Place]) {
    match name_collator() {
        Some(collator) => places.sort_by(|a, b| {
            collator
                .compare(&a.name, &b.name)
                .then_with(|| a.name.cmp(&b.name))
        }),
        None => places.sort_by(|a, b| compare_folded_names(&a.name, &b.name)),
    }
}

/// Root-locale collator at the default (tertiary) strength
fn name_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("Name collation unavailable, falling back to case folding: {:?}", e);
            None
        }
    }
}

fn compare_by_rating(a: &Place, b: &Place) -> Ordering {
    match (a.rating, b.rating) {
        (Some(ra), Some(rb)) => rb
            .total_cmp(&ra)
            .then_with(|| b.user_ratings_total.cmp(&a.user_ratings_total)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[inline]
fn open_status_tier(opening_hours: Option<bool>) -> u8 {
    match opening_hours {
        Some(true) => 0,
        Some(false) => 1,
        None => 2,
    }
}

/// Case-insensitive comparison, falling back to the raw strings
fn compare_folded_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);

    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}
