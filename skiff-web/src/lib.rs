//! Skiff Web - aggregation API server
//!
//! JSON endpoints gluing the IP egress probe, TorAPI search, the
//! download proxy, and the qBittorrent driver together, plus the static
//! browser UI that polls them.

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, router, run_server};
