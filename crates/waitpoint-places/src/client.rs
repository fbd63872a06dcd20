//! HTTP client for the Google Maps Web Service APIs.
//!
//! Wraps `reqwest` with typed response deserialization and envelope
//! status checking. Every endpoint returns a JSON body with a top-level
//! `"status"` field; `"OK"` and `"ZERO_RESULTS"` are success, anything
//! else surfaces as [`PlacesError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use waitpoint_core::Coordinate;

use crate::error::PlacesError;
use crate::provider::{GeocodeHit, PlaceDetails, PlaceProvider, RawPlace, ReviewData};
use crate::types::{
    DetailsResponse, GeocodeResponse, NearbyResult, NearbySearchResponse, PhotoRef,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

/// Width hint passed to the photo endpoint.
const PHOTO_MAX_WIDTH: u32 = 800;

/// Client for the Google Geocoding, Nearby Search, Place Details, and
/// Place Photo endpoints.
///
/// Manages the HTTP client, API key, and base URL. Use
/// [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in
/// tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("waitpoint/0.1 (nearby-place-discovery)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // relative endpoint paths join under it rather than replacing the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::Api {
            status: "INVALID_BASE_URL".to_string(),
            message: Some(format!("invalid base URL '{base_url}': {e}")),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds the full request URL for an endpoint path with properly
    /// percent-encoded query parameters, appending the API key last.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure or a non-2xx
    /// status, [`PlacesError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            // The URL carries the API key; log only the path.
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Checks the envelope `"status"` field. `OK` and `ZERO_RESULTS` pass;
    /// anything else is an API error.
    fn check_envelope_status(body: &serde_json::Value) -> Result<(), PlacesError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("MISSING_STATUS");
        if status == "OK" || status == "ZERO_RESULTS" {
            return Ok(());
        }
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        tracing::warn!(
            status,
            message = message.as_deref().unwrap_or("no message"),
            "non-success envelope status"
        );
        Err(PlacesError::Api {
            status: status.to_owned(),
            message,
        })
    }
}

impl PlaceProvider for GooglePlacesClient {
    /// Geocodes an address with the Singapore country/region restriction.
    ///
    /// `ZERO_RESULTS` yields an empty vector, not an error.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeHit>, PlacesError> {
        let url = self.build_url(
            "geocode/json",
            &[
                ("address", address),
                ("components", "country:SG"),
                ("region", "sg"),
            ],
        );
        let body = self.request_json(&url).await?;
        Self::check_envelope_status(&body)?;

        let envelope: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        Ok(envelope
            .results
            .into_iter()
            .map(|r| GeocodeHit {
                coordinate: Coordinate {
                    lat: r.geometry.location.lat,
                    lng: r.geometry.location.lng,
                },
                formatted_address: r.formatted_address,
            })
            .collect())
    }

    /// Runs one nearby search for a single place type.
    async fn nearby_search(
        &self,
        center: Coordinate,
        radius_m: u32,
        place_type: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", place_type),
        ];
        if let Some(kw) = keyword {
            params.push(("keyword", kw));
        }

        let url = self.build_url("place/nearbysearch/json", &params);
        let body = self.request_json(&url).await?;
        Self::check_envelope_status(&body)?;

        let envelope: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearby_search(type={place_type})"),
                source: e,
            })?;

        Ok(envelope.results.into_iter().map(raw_place).collect())
    }

    /// Fetches price level, reviews, photos, and opening hours for a
    /// place. Asks for exactly those fields to keep the billing SKU low.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "place/details/json",
            &[
                ("place_id", place_id),
                ("fields", "price_level,reviews,photos,opening_hours"),
            ],
        );
        let body = self.request_json(&url).await?;
        Self::check_envelope_status(&body)?;

        let envelope: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("place_details(place_id={place_id})"),
                source: e,
            })?;

        let Some(result) = envelope.result else {
            return Ok(PlaceDetails::default());
        };

        Ok(PlaceDetails {
            price_level: result.price_level,
            reviews: result
                .reviews
                .into_iter()
                .map(|r| ReviewData {
                    author_name: r.author_name,
                    text: r.text,
                    rating: r.rating,
                })
                .collect(),
            photo_references: photo_references(result.photos),
            open_now: result.opening_hours.and_then(|h| h.open_now),
        })
    }

    /// Keyed photo URL for an opaque reference, width-capped at 800px.
    fn photo_url(&self, photo_reference: &str) -> String {
        let url = self.build_url(
            "place/photo",
            &[
                ("maxwidth", &PHOTO_MAX_WIDTH.to_string()),
                ("photoreference", photo_reference),
            ],
        );
        url.to_string()
    }
}

/// Converts a nearby-search wire result into the provider-neutral shape.
fn raw_place(result: NearbyResult) -> RawPlace {
    RawPlace {
        place_id: result.place_id,
        name: result.name,
        types: result.types,
        rating: result.rating,
        location: Coordinate {
            lat: result.geometry.location.lat,
            lng: result.geometry.location.lng,
        },
        vicinity: result.vicinity,
        photo_references: photo_references(result.photos),
        open_now: result.opening_hours.and_then(|h| h.open_now),
    }
}

fn photo_references(photos: Vec<PhotoRef>) -> Vec<String> {
    photos.into_iter().map(|p| p.photo_reference).collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
