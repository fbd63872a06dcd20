mod geocode;
mod places;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use waitpoint_places::PlaceProvider;
use waitpoint_search::PlaceSearch;

/// Shared handler state: the search service plus a startup-time flag
/// for the health endpoint.
pub struct AppState<P> {
    pub search: Arc<PlaceSearch<P>>,
    pub has_api_key: bool,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
            has_api_key: self.has_api_key,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthReply {
    status: &'static str,
    message: &'static str,
    #[serde(rename = "hasApiKey")]
    has_api_key: bool,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app<P>(state: AppState<P>) -> Router
where
    P: PlaceProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/api/health", get(health))
        .route("/api/geocode", post(geocode::geocode))
        .route("/api/nearby-places", post(places::nearby_places))
        .layer(ServiceBuilder::new().layer(build_cors()))
        .with_state(state)
}

async fn health<P>(State(state): State<AppState<P>>) -> Json<HealthReply>
where
    P: PlaceProvider + Send + Sync + 'static,
{
    Json(HealthReply {
        status: "ok",
        message: "Server is running",
        has_api_key: state.has_api_key,
    })
}
