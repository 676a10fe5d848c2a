//! HTTP server implementation using Axum.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use datadesk_core::config::DataDeskConfig;
use datadesk_core::error::Result;
use datadesk_core::traits::{MasterDataStore, Provider};
use datadesk_core::types::MasterData;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// JSON body limit. Master-data replacements arrive as one large paste.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Capacity of the update fan-out channel. A WebSocket client that falls
/// further behind than this skips ahead to the latest revision.
const UPDATE_CHANNEL_CAPACITY: usize = 32;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub config: DataDeskConfig,
    /// Master-data persistence, injected so handlers never touch a global.
    pub store: Arc<dyn MasterDataStore>,
    /// The configured chat-completion backend.
    pub provider: Arc<dyn Provider>,
    /// Fan-out of accepted master-data updates to WebSocket clients.
    pub updates: broadcast::Sender<MasterData>,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(shared: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(super::routes::service_info))
        .route("/health", get(super::routes::health_check))
        .route("/api/master-data", get(super::routes::get_master_data))
        .route("/api/master-data", post(super::routes::update_master_data))
        .route("/api/chat", post(super::routes::chat))
        .route("/api/rag-search", post(super::routes::rag_search))
        .route("/ws", get(super::ws::ws_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600));

            // Restrict CORS origins in production via env var
            // Example: DATADESK_CORS_ORIGINS=https://desk.example.com,https://admin.example.com
            if let Ok(origins_str) = std::env::var("DATADESK_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                // Development fallback: allow all origins
                cors.allow_origin(Any)
            }
        })
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: DataDeskConfig) -> Result<()> {
    let store: Arc<dyn MasterDataStore> = Arc::from(datadesk_store::create_store(&config.storage)?);
    tracing::info!("💾 Master data storage: {}", store.describe());

    let provider: Arc<dyn Provider> = Arc::from(datadesk_providers::create_provider(&config.llm)?);
    tracing::info!(
        "🤖 LLM provider: {} (model={})",
        provider.name(),
        config.llm.model
    );
    // A provider that is not ready is a warning here and an error only once
    // /api/chat is actually called.
    match provider.health_check().await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(
            "⚠️ Provider '{}' is not ready (missing API key or unreachable endpoint)",
            provider.name()
        ),
        Err(e) => tracing::warn!("⚠️ Provider '{}' health check failed: {e}", provider.name()),
    }

    let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = AppState {
        config,
        store,
        provider,
        updates,
        start_time: std::time::Instant::now(),
    };

    let app = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 DataDesk gateway listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
