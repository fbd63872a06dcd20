mod api;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use waitpoint_places::GooglePlacesClient;
use waitpoint_search::{PlaceSearch, SearchConfig};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = waitpoint_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let provider = match config.google_maps_api_key.as_deref() {
        Some(key) => Some(GooglePlacesClient::new(key, config.request_timeout_secs)?),
        None => {
            tracing::warn!("GOOGLE_MAPS_API_KEY not set; search requests will be rejected");
            None
        }
    };
    let has_api_key = provider.is_some();

    let search_config = SearchConfig {
        cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        result_cap: config.result_cap,
        enrich_concurrency: config.enrich_concurrency,
        ..SearchConfig::default()
    };
    let search = Arc::new(PlaceSearch::new(provider, search_config));

    let app = build_app(AppState {
        search,
        has_api_key,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, has_api_key, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
