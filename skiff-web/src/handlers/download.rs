//! Torrent-file download forwarding.
//!
//! The aggregation server cannot reach the tracker itself; it forwards
//! to the dl-proxy running inside the VPN network namespace and streams
//! the proxied body through to the browser.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Response, StatusCode, header};
use serde::Deserialize;
use skiff_proxy::allowlist::check_target;
use tracing::warn;

use crate::server::AppState;

/// Query parameters for `/api/torrent`.
#[derive(Debug, Deserialize)]
pub struct TorrentQuery {
    pub url: Option<String>,
}

/// `GET /api/torrent?url=…`: streams a torrent file via the dl-proxy.
///
/// The allow-list is enforced by the proxy, but it is repeated here to
/// fail fast with a 400 before spending a round trip.
pub async fn api_torrent(
    State(state): State<AppState>,
    Query(query): Query<TorrentQuery>,
) -> Response<Body> {
    let Some(target) = query.url.as_deref().filter(|url| !url.is_empty()) else {
        return text_error(StatusCode::BAD_REQUEST, "Missing url");
    };

    if let Err(reason) = check_target(
        target,
        state.config.proxy.allowed_host,
        state.config.proxy.allowed_path,
    ) {
        warn!(%reason, "rejected torrent url before forwarding");
        return text_error(StatusCode::BAD_REQUEST, &reason);
    }

    let proxied = format!(
        "{}/torrent?url={}",
        state.config.proxy.forward_base,
        urlencoding::encode(target)
    );

    let upstream = match state
        .http
        .get(&proxied)
        .timeout(state.config.proxy.timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return text_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };

    let status = upstream.status();
    if !status.is_success() {
        let body = upstream.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            format!("Upstream {}", status.as_u16())
        } else {
            body
        };
        return text_error(StatusCode::BAD_GATEWAY, &message);
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
        .map(str::to_string);

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(disposition) = content_disposition {
        builder = builder.header(header::CONTENT_DISPOSITION, disposition);
    }
    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .unwrap_or_else(|_| {
            text_error(StatusCode::BAD_GATEWAY, "Upstream headers unusable")
        })
}

fn text_error(status: StatusCode, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(message.to_string()))
        .expect("static error response")
}
