//! Skiff Proxy - torrent-file download streaming proxy
//!
//! A deliberately tiny HTTP service that fetches a torrent file from
//! exactly one allow-listed upstream (rutracker's `dl.php`) and streams
//! the body through unmodified. It runs inside the VPN network
//! namespace so the aggregation server never talks to the tracker
//! directly.

pub mod allowlist;
pub mod server;

// Re-export main types
pub use server::{router, run_server};
