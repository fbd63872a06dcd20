//! Google Maps Web Service response shapes.
//!
//! ## Observed behavior from the live endpoints
//!
//! ### Envelope `status`
//! Every response carries a top-level `status` string. `"OK"` and
//! `"ZERO_RESULTS"` are both successful (the latter with an empty result
//! set); anything else (`REQUEST_DENIED`, `OVER_QUERY_LIMIT`,
//! `INVALID_REQUEST`, ...) is an API-level error, optionally accompanied
//! by a human-readable `error_message`.
//!
//! ### Nearby search results
//! `rating` is absent for unrated places (not `0`); `opening_hours` is
//! absent entirely when Google has no hours data, and when present its
//! `open_now` flag may still be missing. `photos` is absent rather than
//! empty for photo-less places. `vicinity` is a short address fragment,
//! not a full formatted address.
//!
//! ### Details results
//! `price_level` is an integer 0–4 when known. `reviews` returns at most
//! five entries, newest first; `author_name` and `text` have been observed
//! missing on translated or withdrawn reviews, so both are modeled
//! optional and defaulted downstream.

use serde::Deserialize;

/// Top-level envelope for `geocode/json`.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

/// Top-level envelope for `place/nearbysearch/json`.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
}

/// A single place from nearby search.
#[derive(Debug, Deserialize)]
pub struct NearbyResult {
    pub place_id: String,
    pub name: String,
    /// Type tokens, most specific first (e.g. `["cafe", "food", ...]`).
    #[serde(default)]
    pub types: Vec<String>,
    /// Absent for unrated places.
    #[serde(default)]
    pub rating: Option<f64>,
    pub geometry: Geometry,
    /// Short address fragment (street + area), not a full address.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

/// Top-level envelope for `place/details/json`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    /// Price band 0 (free) to 4 (very expensive); absent when unknown.
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub reviews: Vec<ReviewResult>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewResult {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// An opaque photo handle, exchanged for an image URL via the photo
/// endpoint.
#[derive(Debug, Deserialize)]
pub struct PhotoRef {
    pub photo_reference: String,
}

#[derive(Debug, Deserialize)]
pub struct OpeningHours {
    /// May be absent even when `opening_hours` itself is present.
    #[serde(default)]
    pub open_now: Option<bool>,
}
