//! Dual-target IP egress check endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use skiff_core::probe::{self, ProbeOutcome};

use crate::server::AppState;

/// `GET /api/test`: probes both egress routes and reports per-route
/// status lines plus the raw payloads.
///
/// Both probes always settle; a dead VPN never hides what the normal
/// route reports.
pub async fn api_test(State(state): State<AppState>) -> Json<Value> {
    let result = probe::dual_check(&state.http, &state.config.probe).await;

    Json(json!({
        "lines": [
            probe::format_line("VPN", &result.vpn),
            probe::format_line("NORMAL", &result.normal),
        ],
        "raw": {
            "vpn": outcome_json(&result.vpn),
            "normal": outcome_json(&result.normal),
        },
    }))
}

fn outcome_json(outcome: &ProbeOutcome) -> Value {
    match outcome {
        Ok(info) => json!(info),
        Err(reason) => json!({ "ok": false, "error": reason }),
    }
}
