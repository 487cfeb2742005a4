//! Aggregation-server edge behavior with every upstream unreachable.
//!
//! Validates the error taxonomy from the outside: bad input is a 400
//! before any round trip, unreachable collaborators are 5xx with
//! `{ok:false}` bodies, and nothing panics.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use skiff_core::SkiffConfig;
use skiff_web::{AppState, router};
use tower::ServiceExt;

fn test_router() -> axum::Router {
    router(AppState::new(SkiffConfig::for_testing()))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let (status, body) = get("/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Missing q");
}

#[tokio::test]
async fn search_with_unknown_provider_is_bad_request() {
    let (status, body) = get("/api/search?q=dune&provider=piratebay").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn search_with_dead_torapi_is_server_error() {
    let (status, body) = get("/api/search?q=dune&provider=all").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn magnet_unresolvable_is_5xx_with_ok_false() {
    let (status, body) = get("/api/magnet?provider=RuTracker&id=123").await;
    assert!(status.is_server_error());
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn magnet_without_id_is_bad_request() {
    let (status, body) = get("/api/magnet?provider=RuTracker").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn add_unresolvable_is_5xx_with_ok_false() {
    // Magnet resolution fails against the dead TorAPI before any
    // qBittorrent call is attempted.
    let (status, body) = get("/api/qb/add?provider=RuTracker&id=123").await;
    assert!(status.is_server_error());
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn add_without_id_is_bad_request() {
    let (status, body) = get("/api/qb/add?provider=RuTracker").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn downloads_with_dead_qb_is_server_error() {
    let (status, body) = get("/api/qb/downloads").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn files_without_hash_is_bad_request() {
    let (status, body) = get("/api/qb/files").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Missing hash");
}

#[tokio::test]
async fn start_without_hash_is_bad_request() {
    let (status, body) = post_json("/api/qb/start", json!({ "hash": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn setfileprio_without_file_ids_is_bad_request() {
    let (status, body) = post_json(
        "/api/qb/setfileprio",
        json!({ "hash": "ff", "fileIds": [], "priority": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn delete_with_dead_qb_is_server_error() {
    let (status, body) = post_json(
        "/api/qb/delete",
        json!({ "hash": "0123456789abcdef0123456789abcdef01234567", "deleteFiles": true }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn torrent_download_rejects_disallowed_url_before_forwarding() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/torrent?url=https%3A%2F%2Fevil.example%2Fforum%2Fdl.php")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_endpoint_settles_both_probes() {
    // Both probe targets are unroutable; the endpoint must still answer
    // 200 with two ERROR lines rather than failing outright.
    let (status, body) = get("/api/test").await;
    assert_eq!(status, StatusCode::OK);
    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].as_str().unwrap().starts_with("VPN: ERROR"));
    assert!(lines[1].as_str().unwrap().starts_with("NORMAL: ERROR"));
    assert_eq!(body["raw"]["vpn"]["ok"], false);
    assert_eq!(body["raw"]["normal"]["ok"], false);
}
