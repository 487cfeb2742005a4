//! Proxy HTTP server: one route, streamed pass-through.

use axum::Router;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Response, StatusCode, header};
use axum::routing::get;
use serde::Deserialize;
use skiff_core::config::ProxyConfig;
use tracing::{info, warn};

use crate::allowlist::check_target;

/// Shared state: the upstream client and the allow-list config.
#[derive(Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    config: ProxyConfig,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Self {
        // Redirects are inspected, never followed: a 3xx from dl.php is
        // passed to the caller instead of leaking the proxy elsewhere.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client builder with static config");
        Self { http, config }
    }
}

/// Query parameters for the download route.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
}

/// Builds the proxy router.
pub fn router(config: ProxyConfig) -> Router {
    Router::new()
        .route("/torrent", get(proxy_torrent))
        .fallback(not_found)
        .with_state(ProxyState::new(config))
}

/// Runs the proxy server until the listener fails.
///
/// # Errors
/// - `std::io::Error` - failed to bind the listen address
pub async fn run_server(config: ProxyConfig, port: u16) -> std::io::Result<()> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("dl-proxy listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn not_found() -> Response<Body> {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn proxy_torrent(
    State(state): State<ProxyState>,
    Query(query): Query<DownloadQuery>,
) -> Response<Body> {
    let Some(target) = query.url.as_deref().filter(|url| !url.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing url");
    };

    let target = match check_target(
        target,
        state.config.allowed_host,
        state.config.allowed_path,
    ) {
        Ok(url) => url,
        Err(reason) => {
            warn!(%reason, "rejected download target");
            return error_response(StatusCode::BAD_REQUEST, &reason);
        }
    };

    let upstream = match state
        .http
        .get(target.clone())
        .header(header::USER_AGENT, "Mozilla/5.0")
        .header(header::ACCEPT, "application/x-bittorrent,*/*")
        .timeout(state.config.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    // 2xx passes, and so does 3xx: dl.php answers redirects for expired
    // sessions and the caller gets to see that status, not chase it.
    let status = upstream.status();
    if !(status.is_success() || status.is_redirection()) {
        return error_response(
            StatusCode::BAD_GATEWAY,
            &format!("Upstream status {}", status.as_u16()),
        );
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/x-bittorrent")
        .to_string();
    let content_disposition = upstream
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(r#"attachment; filename="download.torrent""#)
        .to_string();

    // content-length / transfer-encoding / content-encoding are dropped
    // deliberately: the re-streamed body no longer matches them.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition)
        .body(Body::from_stream(upstream.bytes_stream()))
        .unwrap_or_else(|_| error_response(StatusCode::BAD_GATEWAY, "Upstream headers unusable"))
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    let body = serde_json::json!({ "ok": false, "error": message }).to_string();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from(body))
        .expect("static error response")
}
