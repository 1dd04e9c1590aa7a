use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::LatLng;

/// Errors that can occur when geocoding
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Address not found")]
    NotFound,

    #[error("Geocoding quota exceeded")]
    QuotaExceeded,

    #[error("Geocoding request denied")]
    RequestDenied,

    #[error("Unable to geocode address: {0}")]
    ApiError(String),
}

impl GeocodeError {
    fn from_status(status: &str) -> Self {
        match status {
            "ZERO_RESULTS" => GeocodeError::NotFound,
            "OVER_QUERY_LIMIT" => GeocodeError::QuotaExceeded,
            "REQUEST_DENIED" => GeocodeError::RequestDenied,
            other => GeocodeError::ApiError(other.to_string()),
        }
    }
}

/// Coordinate found for an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    pub position: LatLng,
    pub address: String,
}

/// Converts between addresses and coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodeError>;

    async fn reverse_geocode(&self, position: LatLng) -> Result<String, GeocodeError>;
}

/// Google Geocoding web service client
pub struct GoogleGeocoder {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GoogleGeocoder {
    /// Create a new Geocoding client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    async fn first_result(&self, query: String) -> Result<ApiResult, GeocodeError> {
        let url = format!(
            "{}/json?{}&key={}",
            self.base_url.trim_end_matches('/'),
            query,
            urlencoding::encode(&self.api_key)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!("HTTP {}", response.status())));
        }

        let body: ApiResponse = response.json().await?;

        if body.status != "OK" {
            return Err(GeocodeError::from_status(&body.status));
        }

        body.results.into_iter().next().ok_or(GeocodeError::NotFound)
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodeError> {
        tracing::debug!("Geocoding address: {}", address);

        let result = self
            .first_result(format!("address={}", urlencoding::encode(address)))
            .await?;

        Ok(GeocodedLocation {
            position: result.geometry.location,
            address: result.formatted_address,
        })
    }

    async fn reverse_geocode(&self, position: LatLng) -> Result<String, GeocodeError> {
        let latlng = format!("{},{}", position.lat, position.lng);

        let result = self
            .first_result(format!("latlng={}", urlencoding::encode(&latlng)))
            .await?;

        Ok(result.formatted_address)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(default)]
    formatted_address: String,
    geometry: ApiGeometry,
}

#[derive(Debug, Deserialize)]
struct ApiGeometry {
    location: LatLng,
}
