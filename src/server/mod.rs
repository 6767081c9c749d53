//! HTTP endpoint layer.
//!
//! Thin translation between HTTP and the catalog/registry services. All
//! shared state lives in [`AppState`] and is injected into handlers, so tests
//! can build isolated instances.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::catalog_source_from;
use crate::config::ServiceConfig;
use crate::core::catalog::Catalog;
use crate::core::registry::CaptureRegistry;
use crate::core::ConfigProvider;
use crate::utils::error::{PokedexError, Result};

pub use error::{ApiErrorResponse, ErrorBody};
pub use handlers::{
    capture_pokemon, get_icon, health_check, list_pokemon, release_pokemon, HealthResponse,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub registry: Arc<CaptureRegistry>,
    pub icon_base_url: Arc<str>,
    pub default_page_size: usize,
}

impl AppState {
    pub fn new<C: ConfigProvider>(catalog: Catalog, config: &C) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            registry: Arc::new(CaptureRegistry::new(Arc::clone(&catalog))),
            catalog,
            icon_base_url: Arc::from(config.icon_base_url()),
            default_page_size: config.default_page_size(),
        }
    }
}

/// Cross-origin access for a single configured client origin, with credentials.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin.trim_end_matches('/')).map_err(|e| {
        PokedexError::InvalidConfigValueError {
            field: "cors.allowed_origin".to_string(),
            value: allowed_origin.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn build_router<C: ConfigProvider>(state: AppState, config: &C) -> Result<Router> {
    let cors = cors_layer(config.allowed_origin())?;

    Ok(Router::new()
        .route("/health", get(health_check))
        .route("/icon/{name}", get(get_icon))
        .route("/pokemon", get(list_pokemon))
        .route("/capture/{name}", post(capture_pokemon))
        .route("/release/{name}", post(release_pokemon))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Loads the catalog, binds the listener and serves until Ctrl-C.
pub async fn run(config: ServiceConfig) -> Result<()> {
    let source = catalog_source_from(config.catalog_source())?;
    let catalog = Catalog::load(source.as_ref()).await?;

    let state = AppState::new(catalog, &config);
    let application = build_router(state, &config)?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        "Listening on http://{} (allowed origin: {})",
        listener.local_addr()?,
        config.allowed_origin()
    );

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(error) => tracing::error!(%error, "Failed to listen for shutdown signal"),
    }
}
