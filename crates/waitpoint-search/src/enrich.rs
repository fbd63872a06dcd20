//! Per-place detail enrichment: price level, reviews, photos, open status.
//!
//! Enrichment never fails the pipeline. A dead details endpoint degrades
//! every field to its absent value; the place still ships.

use waitpoint_core::Review;
use waitpoint_places::PlaceProvider;

/// Review and photo lists are capped at five entries each.
pub const MAX_REVIEWS: usize = 5;
pub const MAX_PHOTOS: usize = 5;

/// Normalized supplementary fields for one place.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub price_level: Option<u8>,
    pub reviews: Vec<Review>,
    /// Photo URLs from the details call. Empty when the details call
    /// failed or returned none; the aggregator prefers the primary search
    /// result's photos over these anyway.
    pub photo_urls: Vec<String>,
    pub open_now: Option<bool>,
}

/// Fetches and normalizes detail fields for `place_id`.
///
/// Any provider error resolves to the all-absent [`Enrichment`]; the
/// failure is logged and the pipeline moves on.
pub async fn enrich_place<P: PlaceProvider>(provider: &P, place_id: &str) -> Enrichment {
    let details = match provider.place_details(place_id).await {
        Ok(details) => details,
        Err(error) => {
            tracing::warn!(place_id, error = %error, "place details failed; using absent defaults");
            return Enrichment::default();
        }
    };

    let reviews = details
        .reviews
        .into_iter()
        .take(MAX_REVIEWS)
        .map(|r| Review {
            author: r.author_name.unwrap_or_else(|| "Anonymous".to_string()),
            text: r.text.unwrap_or_default(),
            rating: r.rating,
        })
        .collect();

    let photo_urls = details
        .photo_references
        .iter()
        .take(MAX_PHOTOS)
        .map(|reference| provider.photo_url(reference))
        .collect();

    Enrichment {
        price_level: details.price_level.filter(|level| *level <= 4),
        reviews,
        photo_urls,
        open_now: details.open_now,
    }
}
