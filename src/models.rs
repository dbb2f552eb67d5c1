use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// Upstream (iTunes Search API) payloads

#[derive(Debug, Clone, Deserialize)]
pub struct ITunesSearchResponse {
    pub results: Vec<ITunesItem>,
}

/// One entry of the upstream `results` array. Albums, music videos and
/// tracks share this shape, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ITunesItem {
    pub wrapper_type: Option<String>,
    pub kind: Option<String>,
    pub artist_name: Option<String>,
    pub track_id: Option<i64>,
    pub collection_name: Option<String>,
    pub track_name: Option<String>,
    pub preview_url: Option<String>,
    pub release_date: Option<String>,
    pub track_price: Option<f64>,
    pub currency: Option<String>,
}

// Track search

#[derive(Deserialize)]
pub struct SearchTracksQuery {
    pub name: Option<String>,
}

/// Track price as exposed to clients. Missing upstream prices serialize as `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceAmount {
    Value(f64),
    NotAvailable,
}

impl Serialize for PriceAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PriceAmount::Value(amount) => serializer.serialize_f64(*amount),
            PriceAmount::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl From<Option<f64>> for PriceAmount {
    fn from(price: Option<f64>) -> Self {
        price.map_or(PriceAmount::NotAvailable, PriceAmount::Value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    #[serde(rename = "valor")]
    pub amount: PriceAmount,
    #[serde(rename = "moneda")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackResult {
    #[serde(rename = "cancion_id")]
    pub track_id: i64,
    #[serde(rename = "nombre_album")]
    pub album_name: String,
    #[serde(rename = "nombre_tema")]
    pub track_name: String,
    pub preview_url: Option<String>,
    #[serde(rename = "fecha_lanzamiento")]
    pub release_date: Option<String>,
    #[serde(rename = "precio")]
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "total_albumes")]
    pub total_albums: usize,
    #[serde(rename = "total_canciones")]
    pub total_tracks: usize,
    #[serde(rename = "albumes")]
    pub albums: Vec<String>,
    #[serde(rename = "canciones")]
    pub tracks: Vec<TrackResult>,
}

// Favorites

/// Body of `POST /favoritos`. Every field is optional here so that missing
/// values can be reported as an incomplete request instead of a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteRequest {
    #[serde(rename = "nombre_banda")]
    pub band_name: Option<String>,
    #[serde(rename = "cancion_id")]
    pub track_id: Option<i64>,
    #[serde(rename = "usuario")]
    pub user: Option<String>,
    pub ranking: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteEntry {
    #[serde(rename = "nombre_banda")]
    pub band_name: String,
    #[serde(rename = "cancion_id")]
    pub track_id: i64,
    #[serde(rename = "usuario")]
    pub user: String,
    pub ranking: Value,
}

#[derive(Serialize)]
pub struct FavoriteAddedResponse {
    pub message: String,
    pub favorite: FavoriteEntry,
}

#[derive(Serialize)]
pub struct FavoriteRemovedResponse {
    pub message: String,
    #[serde(flatten)]
    pub removed: FavoriteEntry,
}

// Misc

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub cached_searches: u64,
    pub favorites: usize,
}
