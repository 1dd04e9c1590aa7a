//! Placefinder - nearby places search and ranking
//!
//! This library provides the place ranking pipeline used by the Placefinder
//! service: filtering by rating, price level and open status, followed by a
//! single sort (distance, rating, open status or name). The Google Places and
//! Geocoding clients that feed the pipeline live in [`services`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{rank, rank_with_distances, distance::{haversine_distance, distance_km}};
pub use models::{LatLng, Place, RankedPlace, FilterConfig, SortType, PlaceType};
