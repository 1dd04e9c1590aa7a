use serde::{Deserialize, Serialize};

use crate::models::domain::{LatLng, RankedPlace, Place};
use crate::services::ResolvedLocation;

/// Response for the place search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlacesResponse {
    pub request_id: String,
    pub location: ResolvedLocation,
    pub places: Vec<RankedPlace>,
    pub total_results: usize,
    pub returned: usize,
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankPlacesResponse {
    pub places: Vec<Place>,
    pub total_results: usize,
    pub returned: usize,
}

/// Entry of the place type catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceTypeEntry {
    pub key: String,
    pub api_type: String,
}

/// Entry of the sort option list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOptionEntry {
    pub value: String,
    pub label: String,
}

/// Defaults a client needs before its first search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDefaultsResponse {
    pub default_center: LatLng,
    pub default_radius_m: u32,
    pub max_radius_m: u32,
}

/// Reverse geocoding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
