use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{LatLng, Place, PlaceDetails, PlaceType, Review};

/// Errors that can occur when fetching places
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Places API quota exceeded")]
    QuotaExceeded,

    #[error("Places API request denied")]
    RequestDenied,

    #[error("Invalid request to Places API")]
    InvalidRequest,

    #[error("Place not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch places: {0}")]
    ApiError(String),
}

impl PlacesError {
    fn from_status(status: &str, context: &str) -> Self {
        match status {
            "OVER_QUERY_LIMIT" => PlacesError::QuotaExceeded,
            "REQUEST_DENIED" => PlacesError::RequestDenied,
            "INVALID_REQUEST" => PlacesError::InvalidRequest,
            "NOT_FOUND" | "ZERO_RESULTS" => PlacesError::NotFound(context.to_string()),
            other => PlacesError::ApiError(other.to_string()),
        }
    }
}

/// Supplies candidate places around a coordinate
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Places within `radius_m` meters of `location`, optionally limited to one category
    async fn nearby(
        &self,
        location: LatLng,
        place_type: Option<PlaceType>,
        radius_m: u32,
    ) -> Result<Vec<Place>, PlacesError>;

    /// Extended record for a single place
    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}

/// Google Places web service client
///
/// Responses are normalized into [`Place`] records:
/// - a rating of 0 or no rating becomes unknown
/// - a price level of 0 or no price level becomes unknown
/// - the address is the vicinity, then the formatted address
pub struct GooglePlacesClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GooglePlacesClient {
    /// Create a new Places client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl PlaceSource for GooglePlacesClient {
    async fn nearby(
        &self,
        location: LatLng,
        place_type: Option<PlaceType>,
        radius_m: u32,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self.endpoint("nearbysearch/json");

        let mut query = vec![
            ("location", format!("{},{}", location.lat, location.lng)),
            ("radius", radius_m.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(place_type) = place_type {
            query.push(("type", place_type.api_type().to_string()));
        }

        tracing::debug!(
            "Nearby search at {},{} (radius: {}m, type: {:?})",
            location.lat,
            location.lng,
            radius_m,
            place_type.map(|t| t.api_type())
        );

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Nearby search returned HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse<Vec<ApiPlace>> = response.json().await?;

        match body.status.as_str() {
            "OK" => Ok(body
                .results
                .unwrap_or_default()
                .into_iter()
                .map(ApiPlace::into_place)
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => {
                if let Some(message) = &body.error_message {
                    tracing::warn!("Places API returned {}: {}", status, message);
                }
                Err(PlacesError::from_status(status, "nearby search"))
            }
        }
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.endpoint("details/json");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Place details returned HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse<ApiPlace> = response.json().await?;

        match (body.status.as_str(), body.result) {
            ("OK", Some(place)) => Ok(place.into_details()),
            ("OK", None) => Err(PlacesError::NotFound(place_id.to_string())),
            (status, _) => Err(PlacesError::from_status(status, place_id)),
        }
    }
}

const DETAIL_FIELDS: &str = "place_id,name,formatted_address,geometry,rating,user_ratings_total,\
price_level,types,photos,opening_hours,website,international_phone_number,reviews,icon";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: String,
    results: Option<T>,
    result: Option<T>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPlace {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: ApiGeometry,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_ratings_total: Option<u32>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<ApiPhoto>,
    #[serde(default)]
    opening_hours: Option<ApiOpeningHours>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    international_phone_number: Option<String>,
    #[serde(default)]
    reviews: Vec<ApiReview>,
}

#[derive(Debug, Deserialize)]
struct ApiGeometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct ApiPhoto {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct ApiOpeningHours {
    #[serde(default)]
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ApiReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    relative_time_description: String,
}

impl ApiPlace {
    fn into_place(self) -> Place {
        Place {
            id: self.place_id,
            name: self.name,
            address: self.vicinity.or(self.formatted_address).unwrap_or_default(),
            position: self.geometry.location,
            rating: self.rating.filter(|rating| *rating > 0.0),
            user_ratings_total: self.user_ratings_total.unwrap_or(0),
            price_level: self.price_level.filter(|level| *level > 0),
            opening_hours: self.opening_hours.and_then(|hours| hours.open_now),
            types: self.types,
            photos: self.photos.into_iter().map(|photo| photo.photo_reference).collect(),
            icon: self.icon,
        }
    }

    fn into_details(mut self) -> PlaceDetails {
        let website = self.website.take();
        let phone = self.international_phone_number.take();
        let reviews = std::mem::take(&mut self.reviews)
            .into_iter()
            .map(|review| Review {
                author_name: review.author_name,
                rating: review.rating,
                text: review.text,
                relative_time_description: review.relative_time_description,
            })
            .collect();

        // Details carry the full formatted address rather than the vicinity
        if self.formatted_address.is_some() {
            self.vicinity = None;
        }

        PlaceDetails {
            place: self.into_place(),
            website,
            phone,
            reviews,
        }
    }
}
