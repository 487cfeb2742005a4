//! Skiff Search - TorAPI passthrough client
//!
//! Wraps a TorAPI instance: title search across torrent trackers and
//! magnet-link resolution by provider and topic id. Responses are
//! reshaped, never enriched: TorAPI owns the data.

pub mod client;
pub mod errors;
pub mod provider;
pub mod types;

// Re-export main types
pub use client::TorApiClient;
pub use errors::SearchError;
pub use provider::Provider;
pub use types::{SearchItem, SearchPayload, flatten_results};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
