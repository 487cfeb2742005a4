//! Dual-target IP egress probe.
//!
//! Asks two peer IP-check services (one on the normal route, one inside
//! the VPN network namespace) where traffic actually leaves from. Both
//! probes run concurrently and both are always waited for: a VPN that is
//! down must not hide what the normal route reports, and vice versa.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;

/// Payload the peer IP-check services answer with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfo {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub ok: bool,
}

/// Outcome of one probe: the payload, or the error message verbatim.
pub type ProbeOutcome = Result<IpInfo, String>;

/// Result of checking both egress routes.
#[derive(Debug)]
pub struct DualCheck {
    pub vpn: ProbeOutcome,
    pub normal: ProbeOutcome,
}

/// Probes a single IP-check service.
///
/// # Errors
/// - `SkiffError::Transport` - request failed or timed out
/// - `SkiffError::UpstreamPayload` - response body was not the expected JSON
pub async fn fetch_ip_info(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> crate::Result<IpInfo> {
    let response = client.get(url).timeout(timeout).send().await?;
    let info = response
        .json::<IpInfo>()
        .await
        .map_err(|e| crate::SkiffError::UpstreamPayload {
            service: "ip-check",
            reason: format!("unexpected payload: {e}"),
        })?;
    Ok(info)
}

/// Probes both egress routes concurrently and waits for both to settle.
///
/// One probe failing never aborts the other; each side carries its own
/// success or failure independently.
pub async fn dual_check(client: &reqwest::Client, config: &ProbeConfig) -> DualCheck {
    let (vpn, normal) = tokio::join!(
        fetch_ip_info(client, &config.vpn_url, config.timeout),
        fetch_ip_info(client, &config.normal_url, config.timeout),
    );

    DualCheck {
        vpn: vpn.map_err(|e| e.to_string()),
        normal: normal.map_err(|e| e.to_string()),
    }
}

/// Formats one probe outcome as the status line the UI and CLI print.
pub fn format_line(label: &str, outcome: &ProbeOutcome) -> String {
    match outcome {
        Ok(info) => format!(
            "{}: {} {} - {}",
            label,
            info.ip,
            info.country,
            if info.ok { "OK" } else { "FAIL" }
        ),
        Err(reason) => format!("{label}: ERROR - {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_success() {
        let outcome: ProbeOutcome = Ok(IpInfo {
            ip: "203.0.113.7".to_string(),
            country: "NL".to_string(),
            ok: true,
        });
        assert_eq!(format_line("VPN", &outcome), "VPN: 203.0.113.7 NL - OK");
    }

    #[test]
    fn test_format_line_upstream_fail_flag() {
        let outcome: ProbeOutcome = Ok(IpInfo {
            ip: "198.51.100.4".to_string(),
            country: "US".to_string(),
            ok: false,
        });
        assert_eq!(
            format_line("NORMAL", &outcome),
            "NORMAL: 198.51.100.4 US - FAIL"
        );
    }

    #[test]
    fn test_format_line_error() {
        let outcome: ProbeOutcome = Err("connection refused".to_string());
        assert_eq!(
            format_line("VPN", &outcome),
            "VPN: ERROR - connection refused"
        );
    }

    #[tokio::test]
    async fn test_dual_check_settles_both_on_failure() {
        // Both targets are unroutable; the check must still settle with
        // two independent errors rather than aborting on the first.
        let config = ProbeConfig {
            normal_url: "http://127.0.0.1:1/test".to_string(),
            vpn_url: "http://127.0.0.1:1/test".to_string(),
            timeout: Duration::from_millis(250),
        };
        let client = reqwest::Client::new();

        let result = dual_check(&client, &config).await;

        assert!(result.vpn.is_err());
        assert!(result.normal.is_err());
    }
}
