use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use waitpoint_core::Coordinate;
use waitpoint_places::PlaceProvider;
use waitpoint_search::SearchError;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeBody {
    #[serde(default)]
    address: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeReply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

impl GeocodeReply {
    fn ok(location: Coordinate) -> Self {
        Self {
            success: true,
            location: Some(location),
            error: None,
        }
    }

    fn failed(error: &'static str) -> Self {
        Self {
            success: false,
            location: None,
            error: Some(error),
        }
    }
}

pub async fn geocode<P>(
    State(state): State<AppState<P>>,
    Json(body): Json<GeocodeBody>,
) -> (StatusCode, Json<GeocodeReply>)
where
    P: PlaceProvider + Send + Sync + 'static,
{
    if body.address.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(GeocodeReply::failed("Address is required")),
        );
    }

    match state.search.resolve_location(&body.address).await {
        Ok(location) => (StatusCode::OK, Json(GeocodeReply::ok(location))),
        Err(SearchError::Config) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(GeocodeReply::failed("Google Maps API key not configured")),
        ),
        Err(SearchError::NotFound) => (
            StatusCode::OK,
            Json(GeocodeReply::failed("Could not geocode address")),
        ),
        Err(SearchError::OutOfRegion) => (
            StatusCode::OK,
            Json(GeocodeReply::failed("Location must be within Singapore")),
        ),
    }
}
