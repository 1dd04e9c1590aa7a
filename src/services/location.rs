use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::core::location::{parse_coordinates, validate_coordinates, CoordinateError};
use crate::models::LatLng;
use crate::services::geocoder::{GeocodeError, Geocoder};

/// Errors that can occur while resolving a user's location
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Please enter an address")]
    EmptyAddress,

    #[error(transparent)]
    InvalidCoordinates(#[from] CoordinateError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// How the user told us where they are
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    /// Coordinates read from the device or given explicitly
    Point { lat: f64, lng: f64 },
    /// Free-form address to geocode
    Address { address: String },
    /// Manually typed `"lat, lng"` string
    Coordinates { coordinates: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Device,
    Address,
    Coordinates,
}

/// Reference point the search runs around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub position: LatLng,
    pub address: Option<String>,
    pub kind: LocationKind,
}

/// Turns a [`LocationInput`] into a coordinate
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, input: &LocationInput) -> Result<ResolvedLocation, LocationError> {
        match input {
            LocationInput::Point { lat, lng } => {
                if !validate_coordinates(*lat, *lng) {
                    return Err(CoordinateError::OutOfRange.into());
                }

                Ok(ResolvedLocation {
                    position: LatLng::new(*lat, *lng),
                    address: None,
                    kind: LocationKind::Device,
                })
            }
            LocationInput::Address { address } => {
                let address = address.trim();
                if address.is_empty() {
                    return Err(LocationError::EmptyAddress);
                }

                let geocoded = self.geocoder.geocode(address).await?;
                tracing::debug!("Resolved '{}' to {:?}", address, geocoded.position);

                Ok(ResolvedLocation {
                    position: geocoded.position,
                    address: Some(geocoded.address),
                    kind: LocationKind::Address,
                })
            }
            LocationInput::Coordinates { coordinates } => Ok(ResolvedLocation {
                position: parse_coordinates(coordinates)?,
                address: None,
                kind: LocationKind::Coordinates,
            }),
        }
    }
}
