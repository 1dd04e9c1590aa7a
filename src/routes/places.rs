use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::SearchSettings;
use crate::core::{rank, rank_with_distances};
use crate::models::{
    AddressResponse, ClientDefaultsResponse, ErrorResponse, GeocodeRequest, HealthResponse,
    LatLng, PlaceType, PlaceTypeEntry, RankPlacesRequest, RankPlacesResponse,
    ReverseGeocodeQuery, SearchPlacesRequest, SearchPlacesResponse, SortOptionEntry, SortType,
};
use crate::services::{GeocodeError, Geocoder, LocationError, LocationResolver, PlaceSource, PlacesError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub places: Arc<dyn PlaceSource>,
    pub geocoder: Arc<dyn Geocoder>,
    pub resolver: LocationResolver,
    pub search: SearchSettings,
}

impl AppState {
    pub fn new(places: Arc<dyn PlaceSource>, geocoder: Arc<dyn Geocoder>, search: SearchSettings) -> Self {
        let resolver = LocationResolver::new(geocoder.clone());
        Self {
            places,
            geocoder,
            resolver,
            search,
        }
    }
}

/// Configure all place-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/defaults", web::get().to(client_defaults))
        .route("/places/types", web::get().to(place_types))
        .route("/places/sorts", web::get().to(sort_options))
        .route("/places/search", web::post().to(search_places))
        .route("/places/rank", web::post().to(rank_places))
        .route("/places/{place_id}", web::get().to(place_details))
        .route("/geocode", web::post().to(geocode))
        .route("/geocode/reverse", web::get().to(reverse_geocode));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn places_error_response(err: &PlacesError) -> HttpResponse {
    let status = match err {
        PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
        PlacesError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        PlacesError::InvalidRequest => StatusCode::BAD_REQUEST,
        PlacesError::RequestDenied | PlacesError::ApiError(_) | PlacesError::RequestError(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    error_response(status, "Failed to fetch places", err.to_string())
}

fn geocode_error_response(err: &GeocodeError) -> HttpResponse {
    let status = match err {
        GeocodeError::NotFound => StatusCode::NOT_FOUND,
        GeocodeError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        GeocodeError::RequestDenied | GeocodeError::ApiError(_) | GeocodeError::RequestError(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    error_response(status, "Geocoding failed", err.to_string())
}

fn location_error_response(err: &LocationError) -> HttpResponse {
    match err {
        LocationError::Geocode(inner) => geocode_error_response(inner),
        LocationError::EmptyAddress | LocationError::InvalidCoordinates(_) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid location", err.to_string())
        }
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map center and search radius limits for clients
async fn client_defaults(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ClientDefaultsResponse {
        default_center: state.search.default_center,
        default_radius_m: state.search.default_radius_m,
        max_radius_m: state.search.max_radius_m,
    })
}

/// List the supported place categories
async fn place_types() -> impl Responder {
    let entries: Vec<PlaceTypeEntry> = PlaceType::ALL
        .iter()
        .map(|place_type| PlaceTypeEntry {
            key: place_type.key().to_string(),
            api_type: place_type.api_type().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(entries)
}

/// List the selectable sort options
async fn sort_options() -> impl Responder {
    let entries: Vec<SortOptionEntry> = SortType::OPTIONS
        .iter()
        .map(|sort| SortOptionEntry {
            value: sort.as_str().to_string(),
            label: sort.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(entries)
}

/// Search places around a location
///
/// POST /api/v1/places/search
///
/// Request body:
/// ```json
/// {
///   "location": { "address": "string" },
///   "placeType": "restaurant",
///   "radiusM": 5000,
///   "filters": { "minRating": 4.0, "maxPriceLevel": 2, "isOpen": true },
///   "sort": "distance"
/// }
/// ```
async fn search_places(
    state: web::Data<AppState>,
    req: web::Json<SearchPlacesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let request_id = uuid::Uuid::new_v4().to_string();

    let location = match state.resolver.resolve(&req.location).await {
        Ok(location) => location,
        Err(e) => {
            tracing::info!("[{}] Could not resolve location: {}", request_id, e);
            return location_error_response(&e);
        }
    };

    let radius_m = state.search.effective_radius(req.radius_m);

    tracing::info!(
        "[{}] Searching places near {},{} (radius: {}m, type: {:?})",
        request_id,
        location.position.lat,
        location.position.lng,
        radius_m,
        req.place_type
    );

    let candidates = match state
        .places
        .nearby(location.position, req.place_type, radius_m)
        .await
    {
        Ok(places) => places,
        Err(e) => {
            tracing::error!("[{}] Nearby search failed: {}", request_id, e);
            return places_error_response(&e);
        }
    };

    let total_results = candidates.len();
    let places = rank_with_distances(&candidates, &req.filters, req.sort, Some(&location.position));

    tracing::info!(
        "[{}] Returning {} places (from {} candidates)",
        request_id,
        places.len(),
        total_results
    );

    HttpResponse::Ok().json(SearchPlacesResponse {
        request_id,
        location,
        returned: places.len(),
        places,
        total_results,
    })
}

/// Rank a caller-supplied list of places
///
/// POST /api/v1/places/rank
async fn rank_places(req: web::Json<RankPlacesRequest>) -> impl Responder {
    let req = req.into_inner();
    let ranked = rank(&req.places, &req.filters, req.sort, req.reference_point.as_ref());

    HttpResponse::Ok().json(RankPlacesResponse {
        total_results: req.places.len(),
        returned: ranked.len(),
        places: ranked,
    })
}

/// Fetch details for a single place
///
/// GET /api/v1/places/{place_id}
async fn place_details(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let place_id = path.into_inner();

    match state.places.details(&place_id).await {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => {
            tracing::warn!("Failed to fetch details for {}: {}", place_id, e);
            places_error_response(&e)
        }
    }
}

/// Geocode an address
///
/// POST /api/v1/geocode
async fn geocode(state: web::Data<AppState>, req: web::Json<GeocodeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.geocoder.geocode(req.address.trim()).await {
        Ok(location) => HttpResponse::Ok().json(location),
        Err(e) => {
            tracing::info!("Geocoding failed for '{}': {}", req.address, e);
            geocode_error_response(&e)
        }
    }
}

/// Reverse geocode a coordinate
///
/// GET /api/v1/geocode/reverse?lat={lat}&lng={lng}
async fn reverse_geocode(
    state: web::Data<AppState>,
    query: web::Query<ReverseGeocodeQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.geocoder.reverse_geocode(LatLng::new(query.lat, query.lng)).await {
        Ok(address) => HttpResponse::Ok().json(AddressResponse { address }),
        Err(e) => {
            tracing::info!("Reverse geocoding failed for {},{}: {}", query.lat, query.lng, e);
            geocode_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Place, PlaceDetails};
    use crate::services::GeocodedLocation;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct FakePlaces {
        places: Vec<Place>,
        last_radius: std::sync::Mutex<Option<u32>>,
    }

    impl FakePlaces {
        fn new(places: Vec<Place>) -> Self {
            Self {
                places,
                last_radius: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl PlaceSource for FakePlaces {
        async fn nearby(
            &self,
            _location: LatLng,
            place_type: Option<PlaceType>,
            radius_m: u32,
        ) -> Result<Vec<Place>, PlacesError> {
            *self.last_radius.lock().unwrap() = Some(radius_m);
            match place_type {
                Some(PlaceType::Atm) => Err(PlacesError::QuotaExceeded),
                _ => Ok(self.places.clone()),
            }
        }

        async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
            self.places
                .iter()
                .find(|place| place.id == place_id)
                .map(|place| PlaceDetails {
                    place: place.clone(),
                    website: None,
                    phone: None,
                    reviews: vec![],
                })
                .ok_or_else(|| PlacesError::NotFound(place_id.to_string()))
        }
    }

    struct FakeGeocoder;

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodeError> {
            if address == "Atlantis" {
                return Err(GeocodeError::NotFound);
            }
            Ok(GeocodedLocation {
                position: LatLng::new(40.70, -74.00),
                address: "Lower Manhattan, New York, NY".to_string(),
            })
        }

        async fn reverse_geocode(&self, _position: LatLng) -> Result<String, GeocodeError> {
            Ok("Lower Manhattan, New York, NY".to_string())
        }
    }

    fn sample_places() -> Vec<Place> {
        vec![
            Place {
                rating: Some(4.1),
                opening_hours: Some(true),
                ..Place::new("far", "Far Diner", LatLng::new(40.75, -74.00))
            },
            Place {
                rating: Some(4.7),
                opening_hours: Some(false),
                ..Place::new("near", "Near Cafe", LatLng::new(40.71, -74.00))
            },
            Place {
                rating: None,
                ..Place::new("unrated", "Unrated Bar", LatLng::new(40.72, -74.00))
            },
        ]
    }

    fn state() -> AppState {
        AppState::new(
            Arc::new(FakePlaces::new(sample_places())),
            Arc::new(FakeGeocoder),
            SearchSettings::default(),
        )
    }

    #[actix_web::test]
    async fn test_search_sorts_by_distance() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({
                "location": { "address": "Manhattan" },
                "sort": "distance"
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["places"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["near", "unrated", "far"]);
        assert_eq!(body["totalResults"], 3);
        assert!(body["places"][0]["distanceKm"].as_f64().unwrap() < 1.2);
        assert_eq!(body["location"]["kind"], "address");
    }

    #[actix_web::test]
    async fn test_search_applies_filters() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({
                "location": { "coordinates": "40.70, -74.00" },
                "filters": { "minRating": 4.0, "isOpen": true },
                "sort": null
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["returned"], 1);
        assert_eq!(body["places"][0]["id"], "far");
    }

    #[actix_web::test]
    async fn test_search_reports_location_errors() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({ "location": { "coordinates": "abc" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({ "location": { "address": "Atlantis" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_search_maps_quota_errors() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({
                "location": { "lat": 40.7, "lng": -74.0 },
                "placeType": "atm"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn test_rank_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/places/rank")
            .set_json(serde_json::json!({
                "places": sample_places(),
                "sort": "rating"
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["places"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["near", "far", "unrated"]);
    }

    #[actix_web::test]
    async fn test_place_details_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/places/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/places/near").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Near Cafe");
    }

    #[actix_web::test]
    async fn test_catalogue_endpoints() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/places/types").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 17);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t["key"] == "hotel" && t["apiType"] == "lodging"));

        let req = test::TestRequest::get().uri("/places/sorts").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["value"], "openStatus");

        let req = test::TestRequest::get().uri("/defaults").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["defaultCenter"]["lat"], 40.7128);
        assert_eq!(body["defaultRadiusM"], 5000);
    }

    #[actix_web::test]
    async fn test_reverse_geocode_validates_range() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/geocode/reverse?lat=95.0&lng=0.0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/geocode/reverse?lat=40.7&lng=-74.0")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["address"], "Lower Manhattan, New York, NY");
    }

    #[actix_web::test]
    async fn test_reverse_geocode_rejects_nan() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/geocode/reverse?lat=NaN&lng=NaN")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_search_radius_follows_configured_max() {
        let places = Arc::new(FakePlaces::new(sample_places()));
        let search = SearchSettings {
            max_radius_m: 80_000,
            ..SearchSettings::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(places.clone(), Arc::new(FakeGeocoder), search)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({
                "location": { "lat": 40.7, "lng": -74.0 },
                "radiusM": 60000
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(*places.last_radius.lock().unwrap(), Some(60_000));

        let req = test::TestRequest::post()
            .uri("/places/search")
            .set_json(serde_json::json!({
                "location": { "lat": 40.7, "lng": -74.0 },
                "radiusM": 120000
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(*places.last_radius.lock().unwrap(), Some(80_000));
    }
}
