use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use waitpoint_core::Place;
use waitpoint_places::PlaceProvider;
use waitpoint_search::{SearchError, SearchRequest};

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlacesBody {
    #[serde(default)]
    location: String,
    /// Radius in kilometers.
    radius: Option<f64>,
    categories: Option<Vec<String>>,
    #[serde(default)]
    search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NearbyPlacesReply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    places: Option<Vec<Place>>,
}

impl NearbyPlacesReply {
    fn ok(places: Vec<Place>) -> Self {
        Self {
            success: true,
            error: None,
            places: Some(places),
        }
    }

    /// A search that ran but found nothing usable: error plus an empty
    /// list, so list-rendering clients need no special case.
    fn failed(error: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            places: Some(Vec::new()),
        }
    }

    /// A request rejected before any search ran.
    fn rejected(error: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            places: None,
        }
    }
}

pub async fn nearby_places<P>(
    State(state): State<AppState<P>>,
    Json(body): Json<NearbyPlacesBody>,
) -> (StatusCode, Json<NearbyPlacesReply>)
where
    P: PlaceProvider + Send + Sync + 'static,
{
    let (Some(radius), Some(categories)) = (body.radius, body.categories) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(NearbyPlacesReply::rejected(
                "Location, radius, and categories are required",
            )),
        );
    };
    if body.location.trim().is_empty() || radius <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(NearbyPlacesReply::rejected(
                "Location, radius, and categories are required",
            )),
        );
    }

    let request = SearchRequest {
        location: body.location,
        radius_km: radius,
        categories,
        search_term: body.search_term.filter(|term| !term.trim().is_empty()),
    };

    match state.search.search(&request).await {
        Ok(places) => (StatusCode::OK, Json(NearbyPlacesReply::ok(places))),
        Err(SearchError::Config) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(NearbyPlacesReply::rejected(
                "Google Maps API key not configured",
            )),
        ),
        Err(SearchError::NotFound) => (
            StatusCode::OK,
            Json(NearbyPlacesReply::failed("Could not find location")),
        ),
        Err(SearchError::OutOfRegion) => (
            StatusCode::OK,
            Json(NearbyPlacesReply::failed(
                "Location must be within Singapore",
            )),
        ),
    }
}
