//! The place-search aggregation pipeline.
//!
//! One request fans out a nearby search per resolved provider type, folds
//! the per-type results (tolerating individual failures), dedups by place
//! id, filters, caps, enriches with bounded concurrency, sorts by
//! distance, and caches the final list.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future;
use futures::stream::{self, StreamExt};
use waitpoint_core::categories::{
    category_for_type, display_label, matched_type, placeholder_photo, resolve_types,
    EXCLUDED_TYPES,
};
use waitpoint_core::geo::{haversine_km, RegionBounds, SINGAPORE_BOUNDS};
use waitpoint_core::{Coordinate, OpeningStatus, Place};
use waitpoint_places::{PlaceProvider, RawPlace};

use crate::cache::{places_key, Clock, SystemClock, TtlCache};
use crate::enrich::{enrich_place, MAX_PHOTOS};
use crate::error::SearchError;
use crate::geocode::resolve_center;

/// One immutable search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text address or a `"lat,lng"` literal.
    pub location: String,
    /// Search radius in kilometers; must be positive.
    pub radius_km: f64,
    /// Raw category identifiers; unknown ones are silently ignored.
    pub categories: Vec<String>,
    /// Optional keyword filter forwarded to the provider.
    pub search_term: Option<String>,
}

/// Pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub cache_ttl: Duration,
    /// Hard cap on returned places. Applied to the deduped pool before
    /// enrichment, so detail-call cost stays bounded.
    pub result_cap: usize,
    /// Maximum concurrent place-details calls.
    pub enrich_concurrency: usize,
    pub bounds: RegionBounds,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(7200),
            result_cap: 50,
            enrich_concurrency: 8,
            bounds: SINGAPORE_BOUNDS,
        }
    }
}

/// The aggregation service. Holds the provider (if configured), the
/// tuning config, and the two response caches shared across requests.
pub struct PlaceSearch<P> {
    provider: Option<P>,
    config: SearchConfig,
    places_cache: TtlCache<Vec<Place>>,
    geocode_cache: TtlCache<Coordinate>,
}

impl<P: PlaceProvider> PlaceSearch<P> {
    /// Creates the service. `provider` is `None` when no API credential
    /// is configured; every search then fails with
    /// [`SearchError::Config`] rather than panicking at startup.
    #[must_use]
    pub fn new(provider: Option<P>, config: SearchConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Like [`PlaceSearch::new`] with an injected cache clock, so TTL
    /// expiry can be driven manually in tests.
    #[must_use]
    pub fn with_clock(provider: Option<P>, config: SearchConfig, clock: Arc<dyn Clock>) -> Self {
        let places_cache = TtlCache::with_clock(config.cache_ttl, Arc::clone(&clock));
        let geocode_cache = TtlCache::with_clock(config.cache_ttl, clock);
        Self {
            provider,
            config,
            places_cache,
            geocode_cache,
        }
    }

    /// Resolves a free-text address (or coordinate literal) to a
    /// region-validated coordinate.
    ///
    /// # Errors
    ///
    /// [`SearchError::Config`] without a provider,
    /// [`SearchError::NotFound`] / [`SearchError::OutOfRegion`] per the
    /// geocoding contract.
    pub async fn resolve_location(&self, address: &str) -> Result<Coordinate, SearchError> {
        let provider = self.provider.as_ref().ok_or(SearchError::Config)?;
        resolve_center(provider, &self.config.bounds, &self.geocode_cache, address).await
    }

    /// Runs the full search pipeline for one request.
    ///
    /// A failed nearby search for one type drops that type's contribution
    /// and continues; only configuration and geocoding failures abort.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Config`] when no provider is configured.
    /// - [`SearchError::NotFound`] when the location cannot be geocoded.
    /// - [`SearchError::OutOfRegion`] when the resolved center is outside
    ///   the configured bounds.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, SearchError> {
        // Credential check precedes the cache so a warm cache never masks
        // a missing key.
        let provider = self.provider.as_ref().ok_or(SearchError::Config)?;

        let key = places_key(&request.location, request.radius_km, &request.categories);
        if let Some(cached) = self.places_cache.get(&key) {
            tracing::debug!(key, "place search cache hit");
            return Ok(cached);
        }

        let center = resolve_center(
            provider,
            &self.config.bounds,
            &self.geocode_cache,
            &request.location,
        )
        .await?;

        // An empty type set (no known categories requested) yields an
        // empty result list, not an error.
        let types = resolve_types(&request.categories);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let radius_m = (request.radius_km * 1000.0) as u32;
        let keyword = request.search_term.as_deref();

        // Fan out one search per type; collect each type's outcome so a
        // single failing type is logged and skipped, never fatal.
        let per_type: Vec<(&str, Result<Vec<RawPlace>, _>)> =
            future::join_all(types.iter().map(|&place_type| async move {
                let result = provider
                    .nearby_search(center, radius_m, place_type, keyword)
                    .await;
                (place_type, result)
            }))
            .await;

        // Flatten in type order, deduplicating by place id first-seen.
        let mut seen: HashSet<String> = HashSet::new();
        let mut pool: Vec<RawPlace> = Vec::new();
        for (place_type, result) in per_type {
            match result {
                Ok(places) => {
                    for raw in places {
                        if seen.insert(raw.place_id.clone()) {
                            pool.push(raw);
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(place_type, error = %error, "nearby search failed; dropping this type's results");
                }
            }
        }

        // Drop hard-excluded types (hotels sneak into most searches) and
        // anything the provider returned that matches none of the
        // requested types.
        let allowed: Vec<&'static str> = types;
        pool.retain(|raw| {
            raw.types
                .iter()
                .all(|t| !EXCLUDED_TYPES.contains(&t.as_str()))
                && matched_type(&raw.types, &allowed).is_some()
        });

        // Cap before enrichment to bound detail-call cost. The cap runs
        // on provider-return order, before the distance sort below.
        pool.truncate(self.config.result_cap);

        let mut enriched: Vec<(f64, Place)> = stream::iter(
            pool.into_iter()
                .map(|raw| build_place(provider, &allowed, center, raw)),
        )
        .buffered(self.config.enrich_concurrency)
        .collect()
        .await;

        // Sort on the unrounded distance so ties are not introduced by
        // display rounding.
        enriched.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        let places: Vec<Place> = enriched.into_iter().map(|(_, place)| place).collect();

        self.places_cache.set(&key, places.clone());
        Ok(places)
    }
}

/// Assembles one output place: enrichment call, distance, display
/// category, photo fallback chain. Returns the unrounded distance
/// alongside for sorting.
async fn build_place<P: PlaceProvider>(
    provider: &P,
    allowed: &[&'static str],
    center: Coordinate,
    raw: RawPlace,
) -> (f64, Place) {
    let enrichment = enrich_place(provider, &raw.place_id).await;

    let distance = haversine_km(center.lat, center.lng, raw.location.lat, raw.location.lng);
    let category = display_label(&raw.types, allowed);

    // Photos: primary search result first, then the details call, then a
    // single category-themed placeholder.
    let photos = if raw.photo_references.is_empty() {
        if enrichment.photo_urls.is_empty() {
            let matched = matched_type(&raw.types, allowed).and_then(category_for_type);
            vec![placeholder_photo(matched).to_string()]
        } else {
            enrichment.photo_urls
        }
    } else {
        raw.photo_references
            .iter()
            .take(MAX_PHOTOS)
            .map(|reference| provider.photo_url(reference))
            .collect()
    };

    // The search result's open_now wins when present; the details call
    // fills the gap.
    let open_now = raw.open_now.or(enrichment.open_now);

    let description = raw
        .vicinity
        .clone()
        .unwrap_or_else(|| "No description available".to_string());
    let address = raw.vicinity.unwrap_or_default();

    let place = Place {
        id: raw.place_id,
        name: raw.name,
        category,
        rating: raw.rating.unwrap_or(0.0),
        price_level: enrichment.price_level,
        reviews: enrichment.reviews,
        photos,
        distance_km: (distance * 10.0).round() / 10.0,
        opening_status: OpeningStatus::from_open_now(open_now),
        description,
        latitude: raw.location.lat,
        longitude: raw.location.lng,
        address,
    };

    (distance, place)
}
