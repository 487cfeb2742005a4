//! Shared helpers: error-to-response mapping and human formatting.

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};
use skiff_core::SkiffError;
use skiff_core::qbittorrent::INFINITE_ETA;
use skiff_search::SearchError;

/// Maps a core error onto the HTTP edge per the taxonomy: 400 for bad
/// input, 502 for upstreams that answered badly, 500 for transport.
pub fn skiff_error_response(err: &SkiffError) -> (StatusCode, Json<Value>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match err {
        // Login failures keep the upstream status and body for diagnosis
        SkiffError::UpstreamAuth {
            status: upstream,
            body,
        } => json!({
            "ok": false,
            "error": "qBittorrent login failed",
            "status": upstream,
            "body": body,
        }),
        _ => json!({ "ok": false, "error": err.to_string() }),
    };
    (status, Json(body))
}

/// Same mapping for search-layer errors.
pub fn search_error_response(err: &SearchError) -> (StatusCode, Json<Value>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "ok": false, "error": err.to_string() })))
}

/// 400 with the standard `{ok:false,error}` body.
pub fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "error": message })),
    )
}

/// Formats a byte count with binary units, e.g. `1.5 GB`.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Formats a transfer rate, e.g. `2.5 MB/s`.
pub fn format_speed(bytes_per_sec: i64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

/// Formats a qBittorrent ETA.
///
/// The sentinel `8640000` means infinite; everything else is rendered
/// with the two largest applicable units.
pub fn format_eta(eta: i64) -> String {
    if eta == INFINITE_ETA {
        return "∞".to_string();
    }
    if eta < 0 {
        return "0s".to_string();
    }
    if eta < 60 {
        return format!("{eta}s");
    }
    if eta < 3600 {
        return format!("{}m {}s", eta / 60, eta % 60);
    }
    if eta < 86400 {
        return format!("{}h {}m", eta / 3600, (eta % 3600) / 60);
    }
    format!("{}d {}h", eta / 86400, (eta % 86400) / 3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eta_sentinel_is_infinite() {
        assert_eq!(format_eta(8_640_000), "∞");
    }

    #[test]
    fn test_format_eta_day_hour() {
        // 1 day, 1 hour, 1 minute, 1 second: only the two largest units show
        assert_eq!(format_eta(90_061), "1d 1h");
    }

    #[test]
    fn test_format_eta_small_values() {
        assert_eq!(format_eta(-5), "0s");
        assert_eq!(format_eta(42), "42s");
        assert_eq!(format_eta(125), "2m 5s");
        assert_eq!(format_eta(3_725), "1h 2m");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_610_612_736), "1.5 GB");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(0), "0 B/s");
        assert_eq!(format_speed(1_048_576), "1.0 MB/s");
    }

    #[test]
    fn test_auth_error_keeps_diagnostics() {
        let err = SkiffError::UpstreamAuth {
            status: 403,
            body: "Fails.".to_string(),
        };
        let (status, Json(body)) = skiff_error_response(&err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], 403);
        assert_eq!(body["body"], "Fails.");
        assert_eq!(body["ok"], false);
    }
}
