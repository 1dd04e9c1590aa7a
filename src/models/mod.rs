// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{LatLng, Place, RankedPlace, PlaceDetails, Review, FilterConfig, SortType, PlaceType};
pub use requests::{SearchPlacesRequest, RankPlacesRequest, GeocodeRequest, ReverseGeocodeQuery};
pub use responses::{SearchPlacesResponse, RankPlacesResponse, PlaceTypeEntry, SortOptionEntry, ClientDefaultsResponse, AddressResponse, HealthResponse, ErrorResponse};
