use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use placefinder::config::{LoggingSettings, Settings};
use placefinder::routes::{self, handle_json_payload_error, handle_query_payload_error, places::AppState};
use placefinder::services::{GoogleGeocoder, GooglePlacesClient};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(io_error(format!("Configuration error: {}", e)));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Placefinder service...");

    if settings.google.api_key.is_empty() {
        error!("No Google Maps API key configured (set GOOGLE_MAPS_API_KEY)");
        return Err(io_error("Google Maps API key required".to_string()));
    }

    let places = GooglePlacesClient::new(
        settings.google.places_base_url.clone(),
        settings.google.api_key.clone(),
        settings.google.timeout_secs,
    )
    .map_err(|e| io_error(format!("Failed to create Places client: {}", e)))?;

    let geocoder = GoogleGeocoder::new(
        settings.google.geocode_base_url.clone(),
        settings.google.api_key.clone(),
        settings.google.timeout_secs,
    )
    .map_err(|e| io_error(format!("Failed to create Geocoding client: {}", e)))?;

    info!(
        "Google clients initialized (timeout: {}s, default radius: {}m)",
        settings.google.timeout_secs, settings.search.default_radius_m
    );

    let app_state = AppState::new(Arc::new(places), Arc::new(geocoder), settings.search.clone());

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
