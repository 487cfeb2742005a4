//! Skiff Core - Shared plumbing for the Skiff glue services
//!
//! Provides configuration, the error taxonomy, tracing setup, the
//! qBittorrent session manager and REST wrapper, magnet-link parsing,
//! and the dual-target IP egress probe.

pub mod config;
pub mod errors;
pub mod magnet;
pub mod probe;
pub mod qbittorrent;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::SkiffConfig;
pub use errors::SkiffError;
pub use magnet::hash_from_magnet;
pub use qbittorrent::{QbClient, Session};

/// Convenience type alias for Results with SkiffError.
pub type Result<T> = std::result::Result<T, SkiffError>;
