//! Aggregation server: router construction and startup.

use axum::Router;
use axum::routing::{get, post};
use skiff_core::SkiffConfig;
use skiff_core::qbittorrent::QbClient;
use skiff_search::TorApiClient;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::handlers::download::api_torrent;
use crate::handlers::probe::api_test;
use crate::handlers::qb::{
    qb_add, qb_delete, qb_downloads, qb_files, qb_set_file_priority, qb_start, qb_stop,
};
use crate::handlers::search::{api_magnet, api_search};

/// Shared state for every handler.
///
/// Holds only clients and config: no cross-request mutable state; each
/// request stands alone.
#[derive(Clone)]
pub struct AppState {
    pub config: SkiffConfig,
    /// Plain client for the probe and the dl-proxy forward
    pub http: reqwest::Client,
    pub qb: QbClient,
    pub search: TorApiClient,
}

impl AppState {
    pub fn new(config: SkiffConfig) -> Self {
        let qb = QbClient::new(config.qbittorrent.clone());
        let search = TorApiClient::new(
            config.search.torapi_base.clone(),
            config.search.timeout,
        );
        Self {
            config,
            http: reqwest::Client::new(),
            qb,
            search,
        }
    }
}

/// Builds the aggregation router with the static UI as fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/test", get(api_test))
        .route("/api/search", get(api_search))
        .route("/api/torrent", get(api_torrent))
        .route("/api/magnet", get(api_magnet))
        .route("/api/qb/downloads", get(qb_downloads))
        .route("/api/qb/files", get(qb_files))
        .route("/api/qb/start", post(qb_start))
        .route("/api/qb/stop", post(qb_stop))
        .route("/api/qb/delete", post(qb_delete))
        .route("/api/qb/setfileprio", post(qb_set_file_priority))
        .route("/api/qb/add", get(qb_add))
        .fallback_service(ServeDir::new("skiff-web/static"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the aggregation server until the listener fails.
///
/// # Errors
/// - `std::io::Error` - failed to bind the listen address
pub async fn run_server(config: SkiffConfig) -> std::io::Result<()> {
    let port = config.server.port;
    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("skiff web on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
