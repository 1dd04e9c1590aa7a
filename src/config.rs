use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::location::DEFAULT_CENTER;
use crate::models::LatLng;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub google: GoogleSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    pub api_key: String,
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_places_base_url() -> String { "https://maps.googleapis.com/maps/api/place".to_string() }
fn default_geocode_base_url() -> String { "https://maps.googleapis.com/maps/api/geocode".to_string() }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_m")]
    pub default_radius_m: u32,
    #[serde(default = "default_max_radius_m")]
    pub max_radius_m: u32,
    /// Map center shown before the user's location is known
    #[serde(default = "default_center")]
    pub default_center: LatLng,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_m: default_radius_m(),
            max_radius_m: default_max_radius_m(),
            default_center: default_center(),
        }
    }
}

impl SearchSettings {
    /// Radius to search with, given an optional caller-supplied value
    pub fn effective_radius(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_radius_m)
            .clamp(1, self.max_radius_m.max(1))
    }
}

fn default_radius_m() -> u32 { 5000 }
fn default_max_radius_m() -> u32 { 50000 }
fn default_center() -> LatLng { DEFAULT_CENTER }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PLACEFINDER_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PLACEFINDER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PLACEFINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PLACEFINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables on top of the layered config
///
/// `GOOGLE_MAPS_API_KEY` is honored so the key can be shared with other
/// tooling without the `PLACEFINDER__` prefix.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("GOOGLE_MAPS_API_KEY") {
        builder = builder.set_override("google.api_key", api_key)?;
    }

    builder.build()
}
