// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod location;
pub mod ranker;
pub mod sorting;

pub use distance::{haversine_distance, distance_km};
pub use filters::{filter_by_rating, filter_by_price, filter_by_open_status, apply_filters};
pub use location::{validate_coordinates, parse_coordinates, format_coordinates, CoordinateError, DEFAULT_CENTER};
pub use ranker::{rank, rank_with_distances};
pub use sorting::{sort_by_distance, sort_by_rating, sort_by_open_status, sort_by_name, apply_sorting};
