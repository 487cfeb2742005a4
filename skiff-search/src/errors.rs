//! Error types for TorAPI search operations.

use thiserror::Error;

/// Errors that can occur during search and magnet resolution.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provider name did not match the known tracker set.
    #[error("Unknown provider: {name}")]
    UnknownProvider {
        /// The name that failed normalization
        name: String,
    },

    /// TorAPI answered with a non-success status.
    #[error("Search failed for query '{query}': TorAPI status {status}")]
    SearchFailed {
        /// The query that failed
        query: String,
        /// The status TorAPI answered with
        status: u16,
    },

    /// TorAPI answered but no magnet link could be found in the payload.
    #[error("No magnet found for {provider} id {id}")]
    MagnetNotFound {
        /// Provider the id belongs to
        provider: String,
        /// The opaque topic id
        id: String,
    },

    /// Network communication error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SearchError {
    /// HTTP status code this error maps to at the service edge.
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::UnknownProvider { .. } => 400,
            SearchError::SearchFailed { .. } | SearchError::MagnetNotFound { .. } => 502,
            SearchError::Network(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            SearchError::UnknownProvider {
                name: "piratebay".to_string(),
            }
            .status_code(),
            400
        );
        assert_eq!(
            SearchError::MagnetNotFound {
                provider: "RuTracker".to_string(),
                id: "123".to_string(),
            }
            .status_code(),
            502
        );
        assert_eq!(
            SearchError::SearchFailed {
                query: "dune".to_string(),
                status: 500,
            }
            .status_code(),
            502
        );
    }
}
