// Service exports
pub mod geocoder;
pub mod location;
pub mod places;

pub use geocoder::{Geocoder, GoogleGeocoder, GeocodedLocation, GeocodeError};
pub use location::{LocationInput, LocationKind, LocationResolver, LocationError, ResolvedLocation};
pub use places::{PlaceSource, GooglePlacesClient, PlacesError};
