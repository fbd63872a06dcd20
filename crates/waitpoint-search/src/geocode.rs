//! Location resolution: free text or `"lat,lng"` into a validated center.

use std::sync::LazyLock;

use regex::Regex;
use waitpoint_core::geo::RegionBounds;
use waitpoint_core::Coordinate;
use waitpoint_places::PlaceProvider;

use crate::cache::{geocode_key, TtlCache};
use crate::error::SearchError;

/// Strict `"<number>,<number>"` form, e.g. `"1.3521,103.8198"`.
static LAT_LNG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.?\d*,-?\d+\.?\d*$").expect("valid regex"));

/// Parses a coordinate literal. Returns `None` for anything that is not
/// strictly two comma-separated decimal numbers.
#[must_use]
pub fn parse_lat_lng(input: &str) -> Option<Coordinate> {
    let trimmed = input.trim();
    if !LAT_LNG_RE.is_match(trimmed) {
        return None;
    }
    let (lat, lng) = trimmed.split_once(',')?;
    Some(Coordinate {
        lat: lat.parse().ok()?,
        lng: lng.parse().ok()?,
    })
}

/// Resolves a location input to a region-validated coordinate.
///
/// Coordinate literals are parsed directly, skipping both the network and
/// the cache. Free-text addresses consult the geocode cache, then the
/// provider (first result only), and cache the validated coordinate under
/// the raw input string.
///
/// # Errors
///
/// - [`SearchError::NotFound`] when the provider returns no results or
///   the call itself fails (a dead geocoder and an unknown address look
///   the same to the caller).
/// - [`SearchError::OutOfRegion`] when the coordinate parses or geocodes
///   fine but lies outside `bounds`.
pub async fn resolve_center<P: PlaceProvider>(
    provider: &P,
    bounds: &RegionBounds,
    cache: &TtlCache<Coordinate>,
    input: &str,
) -> Result<Coordinate, SearchError> {
    if let Some(coordinate) = parse_lat_lng(input) {
        if !bounds.contains(coordinate.lat, coordinate.lng) {
            return Err(SearchError::OutOfRegion);
        }
        return Ok(coordinate);
    }

    let key = geocode_key(input);
    if let Some(cached) = cache.get(&key) {
        tracing::debug!(address = input, "geocode cache hit");
        return Ok(cached);
    }

    let hits = provider.geocode(input).await.map_err(|error| {
        tracing::warn!(address = input, error = %error, "geocoding call failed");
        SearchError::NotFound
    })?;

    let Some(first) = hits.first() else {
        return Err(SearchError::NotFound);
    };

    let coordinate = first.coordinate;
    if !bounds.contains(coordinate.lat, coordinate.lng) {
        return Err(SearchError::OutOfRegion);
    }

    cache.set(&key, coordinate);
    Ok(coordinate)
}
