//! qBittorrent endpoints: download table, file lists, mutations, and
//! the add-from-search orchestration.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use skiff_core::qbittorrent::OpReport;
use skiff_search::Provider;
use tracing::info;

use super::utils::{bad_request, search_error_response, skiff_error_response};
use crate::server::AppState;

/// Query parameters for `/api/qb/files`.
#[derive(Debug, Deserialize)]
pub struct FilesQuery {
    #[serde(default)]
    pub hash: String,
}

/// Body for start/stop.
#[derive(Debug, Deserialize)]
pub struct HashBody {
    #[serde(default)]
    pub hash: String,
}

/// Body for delete.
#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    #[serde(default)]
    pub hash: String,
    #[serde(rename = "deleteFiles", default)]
    pub delete_files: bool,
}

/// Body for batched file-priority updates.
#[derive(Debug, Deserialize)]
pub struct FilePrioBody {
    #[serde(default)]
    pub hash: String,
    #[serde(rename = "fileIds", default)]
    pub file_ids: Vec<i64>,
    #[serde(default)]
    pub priority: i64,
}

/// Query parameters for `/api/qb/add`.
#[derive(Debug, Deserialize)]
pub struct AddQuery {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub id: String,
}

/// `GET /api/qb/downloads`: the full torrent table.
pub async fn qb_downloads(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.qb.torrents(None).await {
        Ok(torrents) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "torrents": torrents })),
        ),
        Err(e) => skiff_error_response(&e),
    }
}

/// `GET /api/qb/files?hash=…`: files of one torrent.
pub async fn qb_files(
    State(state): State<AppState>,
    Query(query): Query<FilesQuery>,
) -> (StatusCode, Json<Value>) {
    let hash = query.hash.trim();
    if hash.is_empty() {
        return bad_request("Missing hash");
    }
    match state.qb.files(hash).await {
        Ok(files) => (StatusCode::OK, Json(json!({ "ok": true, "files": files }))),
        Err(e) => skiff_error_response(&e),
    }
}

/// `POST /api/qb/start`: resume a torrent.
pub async fn qb_start(
    State(state): State<AppState>,
    Json(body): Json<HashBody>,
) -> (StatusCode, Json<Value>) {
    let hash = body.hash.trim();
    if hash.is_empty() {
        return bad_request("Missing hash");
    }
    op_response(state.qb.start(hash).await)
}

/// `POST /api/qb/stop`: pause a torrent.
pub async fn qb_stop(
    State(state): State<AppState>,
    Json(body): Json<HashBody>,
) -> (StatusCode, Json<Value>) {
    let hash = body.hash.trim();
    if hash.is_empty() {
        return bad_request("Missing hash");
    }
    op_response(state.qb.stop(hash).await)
}

/// `POST /api/qb/delete`: remove a torrent, optionally with its data.
pub async fn qb_delete(
    State(state): State<AppState>,
    Json(body): Json<DeleteBody>,
) -> (StatusCode, Json<Value>) {
    let hash = body.hash.trim();
    if hash.is_empty() {
        return bad_request("Missing hash");
    }
    op_response(state.qb.delete(hash, body.delete_files).await)
}

/// `POST /api/qb/setfileprio`: one batched priority update.
pub async fn qb_set_file_priority(
    State(state): State<AppState>,
    Json(body): Json<FilePrioBody>,
) -> (StatusCode, Json<Value>) {
    let hash = body.hash.trim();
    if hash.is_empty() {
        return bad_request("Missing hash");
    }
    if body.file_ids.is_empty() {
        return bad_request("Missing fileIds");
    }
    op_response(
        state
            .qb
            .set_file_priority(hash, &body.file_ids, body.priority)
            .await,
    )
}

/// `GET /api/qb/add?provider=…&id=…`: resolve a magnet via TorAPI and
/// add it to qBittorrent with streaming-friendly flags.
pub async fn qb_add(
    State(state): State<AppState>,
    Query(query): Query<AddQuery>,
) -> (StatusCode, Json<Value>) {
    let id = query.id.trim();
    if id.is_empty() {
        return bad_request("Missing id");
    }
    let provider = match query.provider.parse::<Provider>() {
        Ok(provider) => provider,
        Err(e) => return search_error_response(&e),
    };

    let magnet = match state.search.resolve_magnet(provider, id).await {
        Ok(magnet) => magnet,
        Err(e) => return search_error_response(&e),
    };

    match state.qb.add_magnet(&magnet).await {
        Ok(report) => {
            info!(hash = %report.hash, actions = ?report.actions, "torrent added");
            let mut body = json!(report);
            body["ok"] = json!(true);
            (StatusCode::OK, Json(body))
        }
        Err(e) => skiff_error_response(&e),
    }
}

/// Mutations forward the upstream status and body verbatim; `ok` tells
/// the UI whether qBittorrent accepted the call.
fn op_response(result: skiff_core::Result<OpReport>) -> (StatusCode, Json<Value>) {
    match result {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "ok": report.ok,
                "status": report.status,
                "body": report.body,
            })),
        ),
        Err(e) => skiff_error_response(&e),
    }
}
