use serde::{Deserialize, Deserializer, Serialize};

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    ///
    /// A coordinate that fails this check is treated as missing wherever a
    /// reference point is optional.
    pub fn is_usable(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A point of interest returned by a place source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub position: LatLng,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: u32,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub opening_hours: Option<bool>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Provider photo references, not URLs. Clients resolve them through
    /// the Places Photo endpoint.
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Place {
    /// Minimal place with every optional attribute unknown
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: LatLng) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            position,
            rating: None,
            user_ratings_total: 0,
            price_level: None,
            opening_hours: None,
            types: Vec::new(),
            photos: Vec::new(),
            icon: None,
        }
    }
}

/// Place with the distance from the reference point, for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: Option<f64>,
}

/// A single user review attached to place details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author_name: String,
    pub rating: Option<f64>,
    pub text: String,
    pub relative_time_description: String,
}

/// Extended record for a single place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    #[serde(flatten)]
    pub place: Place,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub reviews: Vec<Review>,
}

/// Filter settings chosen by the user. `None` means no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub max_price_level: Option<i32>,
    #[serde(default)]
    pub is_open: Option<bool>,
}

impl FilterConfig {
    /// Whether any dimension is constrained
    pub fn is_active(&self) -> bool {
        self.min_rating.is_some() || self.max_price_level.is_some() || self.is_open.is_some()
    }
}

/// Sort criterion for the place list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortType {
    Distance,
    Rating,
    OpenStatus,
    Name,
    #[default]
    #[serde(other)]
    None,
}

impl SortType {
    /// Every selectable criterion, in menu order
    pub const OPTIONS: [SortType; 4] = [
        SortType::OpenStatus,
        SortType::Distance,
        SortType::Rating,
        SortType::Name,
    ];

    /// Map a wire name to a sort type. Unrecognized names mean no sorting.
    pub fn parse(value: &str) -> Self {
        match value {
            "distance" => SortType::Distance,
            "rating" => SortType::Rating,
            "openStatus" => SortType::OpenStatus,
            "name" => SortType::Name,
            _ => SortType::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::Distance => "distance",
            SortType::Rating => "rating",
            SortType::OpenStatus => "openStatus",
            SortType::Name => "name",
            SortType::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortType::Distance => "Distance (Closest First)",
            SortType::Rating => "Rating (Highest First)",
            SortType::OpenStatus => "Open Status (Open First)",
            SortType::Name => "Name (A-Z)",
            SortType::None => "Default Order",
        }
    }
}

/// Accepts `null` as well as any string for a [`SortType`] field
pub fn deserialize_sort_type<'de, D>(deserializer: D) -> Result<SortType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SortType>::deserialize(deserializer)?.unwrap_or_default())
}

/// Place categories understood by the places provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Restaurant,
    Cafe,
    Bar,
    Hotel,
    GasStation,
    Pharmacy,
    Hospital,
    Bank,
    Atm,
    ShoppingMall,
    Store,
    GroceryOrSupermarket,
    Gym,
    Park,
    Museum,
    MovieTheater,
    NightClub,
}

impl PlaceType {
    pub const ALL: [PlaceType; 17] = [
        PlaceType::Restaurant,
        PlaceType::Cafe,
        PlaceType::Bar,
        PlaceType::Hotel,
        PlaceType::GasStation,
        PlaceType::Pharmacy,
        PlaceType::Hospital,
        PlaceType::Bank,
        PlaceType::Atm,
        PlaceType::ShoppingMall,
        PlaceType::Store,
        PlaceType::GroceryOrSupermarket,
        PlaceType::Gym,
        PlaceType::Park,
        PlaceType::Museum,
        PlaceType::MovieTheater,
        PlaceType::NightClub,
    ];

    /// Key used by clients
    pub fn key(&self) -> &'static str {
        match self {
            PlaceType::Restaurant => "restaurant",
            PlaceType::Cafe => "cafe",
            PlaceType::Bar => "bar",
            PlaceType::Hotel => "hotel",
            PlaceType::GasStation => "gas_station",
            PlaceType::Pharmacy => "pharmacy",
            PlaceType::Hospital => "hospital",
            PlaceType::Bank => "bank",
            PlaceType::Atm => "atm",
            PlaceType::ShoppingMall => "shopping_mall",
            PlaceType::Store => "store",
            PlaceType::GroceryOrSupermarket => "grocery_or_supermarket",
            PlaceType::Gym => "gym",
            PlaceType::Park => "park",
            PlaceType::Museum => "museum",
            PlaceType::MovieTheater => "movie_theater",
            PlaceType::NightClub => "night_club",
        }
    }

    /// Type name sent to the places provider
    pub fn api_type(&self) -> &'static str {
        match self {
            PlaceType::Hotel => "lodging",
            other => other.key(),
        }
    }
}
