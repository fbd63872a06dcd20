//! Output domain model: the place entity returned to callers.
//!
//! A [`Place`] is built fresh for every request from the raw provider
//! result plus the detail-enrichment fields, and is never mutated after
//! construction. Its serialized form is the public wire contract of the
//! nearby-places endpoint, hence the camelCase renames.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Whether a place is currently open, as far as the provider knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningStatus {
    Open,
    Closed,
    Unknown,
}

impl OpeningStatus {
    /// Maps the provider's optional `open_now` flag to the tri-state.
    #[must_use]
    pub fn from_open_now(open_now: Option<bool>) -> Self {
        match open_now {
            Some(true) => Self::Open,
            Some(false) => Self::Closed,
            None => Self::Unknown,
        }
    }
}

/// A single user review attached to a place.
///
/// Reviews are passed through in the order the provider returns them
/// (newest first), capped at five per place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Reviewer display name; `"Anonymous"` when the provider omits it.
    pub author: String,
    /// Review body; empty string when the provider omits it.
    pub text: String,
    /// Star rating given by this reviewer, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A fully assembled nearby place, ready for the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Provider-assigned place identifier; unique within one result list.
    pub id: String,
    pub name: String,
    /// Display label derived from the place's matched provider type
    /// (e.g. `"Meal Takeaway"`), or `"Place"` when nothing matched.
    pub category: String,
    /// Aggregate rating; `0.0` when the provider reports none.
    pub rating: f64,
    /// Price band 0 (free) to 4 (very expensive); `None` when unknown.
    pub price_level: Option<u8>,
    /// Up to five reviews, provider order.
    pub reviews: Vec<Review>,
    /// Up to five photo URLs; always at least one (a category-derived
    /// placeholder when the provider has no photos).
    pub photos: Vec<String>,
    /// Great-circle distance from the search center, rounded to one
    /// decimal place for display. Sorting uses the unrounded value.
    pub distance_km: f64,
    pub opening_status: OpeningStatus,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}
