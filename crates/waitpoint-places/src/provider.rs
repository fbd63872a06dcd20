//! The place-provider capability consumed by the search pipeline.
//!
//! The pipeline never talks to Google directly; it talks to this trait.
//! [`crate::GooglePlacesClient`] is the production implementation, and the
//! pipeline's integration tests substitute an in-memory stub.

use std::future::Future;

use waitpoint_core::Coordinate;

use crate::error::PlacesError;

/// One geocoding candidate for an address.
#[derive(Debug, Clone)]
pub struct GeocodeHit {
    pub coordinate: Coordinate,
    pub formatted_address: Option<String>,
}

/// A raw place as returned by nearby search, before normalization.
#[derive(Debug, Clone)]
pub struct RawPlace {
    pub place_id: String,
    pub name: String,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub location: Coordinate,
    pub vicinity: Option<String>,
    pub photo_references: Vec<String>,
    pub open_now: Option<bool>,
}

/// Supplementary fields from a place-details call.
#[derive(Debug, Clone, Default)]
pub struct PlaceDetails {
    pub price_level: Option<u8>,
    pub reviews: Vec<ReviewData>,
    pub photo_references: Vec<String>,
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ReviewData {
    pub author_name: Option<String>,
    pub text: Option<String>,
    pub rating: Option<f64>,
}

/// Capability: given a location and a type, return raw nearby places;
/// given an address, coordinates; given a place id, detail fields.
///
/// All calls may legitimately return empty result sets. Implementations
/// are expected to apply their own request timeouts so callers never
/// block unboundedly.
pub trait PlaceProvider: Send + Sync {
    /// Geocodes a free-text address, restricted to the serviced region.
    /// May return zero hits.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<GeocodeHit>, PlacesError>> + Send;

    /// Searches for places of one type around a center. `keyword` narrows
    /// the search with free text when present.
    fn nearby_search(
        &self,
        center: Coordinate,
        radius_m: u32,
        place_type: &str,
        keyword: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send;

    /// Fetches supplementary detail fields for one place.
    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<PlaceDetails, PlacesError>> + Send;

    /// Builds a fetchable image URL from an opaque photo reference.
    fn photo_url(&self, photo_reference: &str) -> String;
}
