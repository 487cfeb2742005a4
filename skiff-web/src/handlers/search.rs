//! TorAPI passthrough endpoints: title search and magnet resolution.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use skiff_search::{Provider, SearchPayload};

use super::utils::{bad_request, search_error_response};
use crate::server::AppState;

/// Query parameters for `/api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub provider: String,
}

/// Query parameters for `/api/magnet`.
#[derive(Debug, Deserialize)]
pub struct MagnetQuery {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub id: String,
}

/// `GET /api/search?q=…&provider=…`: passthrough title search.
///
/// A JSON body from TorAPI comes back under `data`; anything else is
/// kept verbatim under `raw`.
pub async fn api_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> (StatusCode, Json<Value>) {
    let q = query.q.trim();
    if q.is_empty() {
        return bad_request("Missing q");
    }

    let provider = match query.provider.parse::<Provider>() {
        Ok(provider) => provider,
        Err(e) => return search_error_response(&e),
    };

    match state.search.search_title(q, provider).await {
        Ok(SearchPayload::Json(data)) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "provider": provider.as_str(),
                "query": q,
                "data": data,
            })),
        ),
        Ok(SearchPayload::Raw(text)) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "provider": provider.as_str(),
                "query": q,
                "raw": text,
            })),
        ),
        Err(e) => search_error_response(&e),
    }
}

/// `GET /api/magnet?provider=…&id=…`: resolves one magnet link.
pub async fn api_magnet(
    State(state): State<AppState>,
    Query(query): Query<MagnetQuery>,
) -> (StatusCode, Json<Value>) {
    if query.id.trim().is_empty() {
        return bad_request("Missing id");
    }
    let provider = match query.provider.parse::<Provider>() {
        Ok(provider) => provider,
        Err(e) => return search_error_response(&e),
    };

    match state.search.resolve_magnet(provider, query.id.trim()).await {
        Ok(magnet) => (StatusCode::OK, Json(json!({ "ok": true, "magnet": magnet }))),
        Err(e) => search_error_response(&e),
    }
}
