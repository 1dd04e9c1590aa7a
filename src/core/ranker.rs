use crate::core::{distance::distance_km, filters::apply_filters, sorting::sort_in_place};
use crate::models::{FilterConfig, LatLng, Place, RankedPlace, SortType};

/// Turn a raw place list into the ordered list shown to the user
///
/// # Pipeline Stages
/// 1. Filter stage: rating, price level, open status
/// 2. Sort stage: the single selected criterion, applied to the filtered set
///
/// The input is never modified and the same inputs always give the same
/// output. Invalid filter values, an unrecognized sort or a missing reference
/// point each degrade to a no-op for their stage.
pub fn rank(
    places: &[Place],
    filters: &FilterConfig,
    sort_type: SortType,
    reference: Option<&LatLng>,
) -> Vec<Place> {
    let mut ranked = apply_filters(places, filters);
    sort_in_place(&mut ranked, sort_type, reference);

    tracing::debug!(
        "Ranked {} places into {} (sort: {})",
        places.len(),
        ranked.len(),
        sort_type.as_str()
    );

    ranked
}

/// Same as [`rank`], attaching each place's distance from `reference`
///
/// Distances are `None` when there is no usable reference point.
pub fn rank_with_distances(
    places: &[Place],
    filters: &FilterConfig,
    sort_type: SortType,
    reference: Option<&LatLng>,
) -> Vec<RankedPlace> {
    let reference = reference.filter(|point| point.is_usable());

    rank(places, filters, sort_type, reference)
        .into_iter()
        .map(|place| {
            let distance_km = reference.map(|point| distance_km(point, &place.position));
            RankedPlace { place, distance_km }
        })
        .collect()
}
