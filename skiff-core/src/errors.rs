//! Error taxonomy shared by every Skiff service.
//!
//! Variants map one-to-one onto the HTTP statuses the handlers emit:
//! bad input is a 400, an upstream that answered badly is a 502, and a
//! transport failure (connect error, timeout) is a 500. Nothing here is
//! retried; every failure is reformatted and surfaced to the caller.

use thiserror::Error;

/// Errors that can occur in any Skiff service.
#[derive(Debug, Error)]
pub enum SkiffError {
    /// The caller supplied missing or invalid parameters.
    #[error("Bad request: {reason}")]
    BadRequest {
        /// What was wrong with the input
        reason: String,
    },

    /// qBittorrent rejected the login or issued no session cookie.
    #[error("qBittorrent login failed (status {status}): {body}")]
    UpstreamAuth {
        /// HTTP status the login endpoint returned
        status: u16,
        /// Response body, kept verbatim for the 502 diagnostic
        body: String,
    },

    /// An upstream answered with a non-success status.
    #[error("Upstream {service} returned status {status}")]
    UpstreamStatus {
        /// Which collaborator answered
        service: &'static str,
        /// The status it answered with
        status: u16,
    },

    /// An upstream answered 2xx but the payload was unusable
    /// (no magnet found, no info-hash extractable, malformed JSON).
    #[error("Upstream {service} payload error: {reason}")]
    UpstreamPayload {
        /// Which collaborator answered
        service: &'static str,
        /// Why the payload could not be used
        reason: String,
    },

    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SkiffError {
    /// HTTP status code this error maps to at the service edge.
    pub fn status_code(&self) -> u16 {
        match self {
            SkiffError::BadRequest { .. } => 400,
            SkiffError::UpstreamAuth { .. }
            | SkiffError::UpstreamStatus { .. }
            | SkiffError::UpstreamPayload { .. } => 502,
            SkiffError::Transport(_) => 500,
        }
    }

    /// Shorthand for a missing/invalid parameter error.
    pub fn bad_request(reason: impl Into<String>) -> Self {
        SkiffError::BadRequest {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(SkiffError::bad_request("Missing q").status_code(), 400);
        assert_eq!(
            SkiffError::UpstreamAuth {
                status: 403,
                body: "Fails.".to_string(),
            }
            .status_code(),
            502
        );
        assert_eq!(
            SkiffError::UpstreamStatus {
                service: "torapi",
                status: 404,
            }
            .status_code(),
            502
        );
        assert_eq!(
            SkiffError::UpstreamPayload {
                service: "torapi",
                reason: "no magnet in response".to_string(),
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_display_keeps_diagnostics() {
        let err = SkiffError::UpstreamAuth {
            status: 403,
            body: "Fails.".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("Fails."));
    }
}
