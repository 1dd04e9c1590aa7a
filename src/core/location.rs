//! Manual coordinate entry: validation, parsing and display formatting.

use thiserror::Error;

use crate::models::LatLng;

/// Map center used before the user's location is known (New York City)
pub const DEFAULT_CENTER: LatLng = LatLng { lat: 40.7128, lng: -74.0060 };

/// Errors produced while parsing a `"lat, lng"` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("Please enter coordinates")]
    Empty,

    #[error("Invalid format. Please use: latitude, longitude (e.g., 40.7128, -74.0060)")]
    InvalidFormat,

    #[error("Coordinates must be valid numbers")]
    NotANumber,

    #[error("Invalid coordinates. Latitude: -90 to 90, Longitude: -180 to 180")]
    OutOfRange,
}

/// Check that a latitude/longitude pair is finite and within range
#[inline]
pub fn validate_coordinates(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

/// Parse user input such as `"40.7128, -74.0060"`
pub fn parse_coordinates(input: &str) -> Result<LatLng, CoordinateError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoordinateError::Empty);
    }

    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(CoordinateError::InvalidFormat);
    };

    let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) else {
        return Err(CoordinateError::NotANumber);
    };

    if lat.is_nan() || lng.is_nan() {
        return Err(CoordinateError::NotANumber);
    }

    if !validate_coordinates(lat, lng) {
        return Err(CoordinateError::OutOfRange);
    }

    Ok(LatLng::new(lat, lng))
}

/// Format a coordinate pair with six decimals, or an empty string if invalid
pub fn format_coordinates(lat: f64, lng: f64) -> String {
    if !validate_coordinates(lat, lng) {
        return String::new();
    }

    format!("{:.6}, {:.6}", lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(40.7128, -74.0060));
        assert!(validate_coordinates(-90.0, 180.0));
        assert!(!validate_coordinates(90.1, 0.0));
        assert!(!validate_coordinates(0.0, -180.5));
        assert!(!validate_coordinates(f64::NAN, 0.0));
        assert!(!validate_coordinates(0.0, f64::INFINITY));
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("40.7128, -74.0060"), Ok(LatLng::new(40.7128, -74.0060)));
        assert_eq!(parse_coordinates("  51.5,-0.12 "), Ok(LatLng::new(51.5, -0.12)));
    }

    #[test]
    fn test_parse_coordinates_errors() {
        assert_eq!(parse_coordinates("   "), Err(CoordinateError::Empty));
        assert_eq!(parse_coordinates("40.7128"), Err(CoordinateError::InvalidFormat));
        assert_eq!(parse_coordinates("1, 2, 3"), Err(CoordinateError::InvalidFormat));
        assert_eq!(parse_coordinates("north, west"), Err(CoordinateError::NotANumber));
        assert_eq!(parse_coordinates("NaN, 1"), Err(CoordinateError::NotANumber));
        assert_eq!(parse_coordinates("91, 0"), Err(CoordinateError::OutOfRange));
    }

    #[test]
    fn test_default_center_is_valid() {
        assert!(validate_coordinates(DEFAULT_CENTER.lat, DEFAULT_CENTER.lng));
        assert_eq!(format_coordinates(DEFAULT_CENTER.lat, DEFAULT_CENTER.lng), "40.712800, -74.006000");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(40.7128, -74.006), "40.712800, -74.006000");
        assert_eq!(format_coordinates(100.0, 0.0), "");
    }
}
