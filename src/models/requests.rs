use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::location::validate_coordinates;
use crate::models::domain::{deserialize_sort_type, FilterConfig, LatLng, Place, PlaceType, SortType};
use crate::services::LocationInput;

/// Request to search for places around a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlacesRequest {
    pub location: LocationInput,
    #[serde(default)]
    pub place_type: Option<PlaceType>,
    /// Clamped to `search.max_radius_m` by the handler
    #[validate(range(min = 1))]
    #[serde(default)]
    pub radius_m: Option<u32>,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default, deserialize_with = "deserialize_sort_type")]
    pub sort: SortType,
}

/// Request to rank a caller-supplied list of places
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankPlacesRequest {
    pub places: Vec<Place>,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default, deserialize_with = "deserialize_sort_type")]
    pub sort: SortType,
    #[serde(default)]
    pub reference_point: Option<LatLng>,
}

/// Request to geocode a free-form address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeocodeRequest {
    #[validate(length(min = 1))]
    pub address: String,
}

/// Query string for reverse geocoding
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_query_position"))]
pub struct ReverseGeocodeQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

// Range checks alone let NaN through
fn validate_query_position(query: &ReverseGeocodeQuery) -> Result<(), ValidationError> {
    if validate_coordinates(query.lat, query.lng) {
        return Ok(());
    }

    let mut error = ValidationError::new("invalid_coordinates");
    error.message = Some("Latitude and longitude must be finite numbers".into());
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_geocode_query_rejects_nan() {
        let query = ReverseGeocodeQuery { lat: f64::NAN, lng: f64::NAN };
        assert!(query.validate().is_err());

        let query = ReverseGeocodeQuery { lat: 10.0, lng: f64::INFINITY };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_reverse_geocode_query_accepts_valid_position() {
        let query = ReverseGeocodeQuery { lat: 0.0, lng: -74.006 };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_search_radius_has_no_fixed_upper_bound() {
        let request: SearchPlacesRequest = serde_json::from_str(
            r#"{"location": {"lat": 40.7, "lng": -74.0}, "radiusM": 80000}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let request: SearchPlacesRequest = serde_json::from_str(
            r#"{"location": {"lat": 40.7, "lng": -74.0}, "radiusM": 0}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }
}
