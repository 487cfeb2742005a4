//! Centralized configuration for Skiff.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Skiff services.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct SkiffConfig {
    pub qbittorrent: QbConfig,
    pub search: SearchConfig,
    pub probe: ProbeConfig,
    pub proxy: ProxyConfig,
    pub server: ServerConfig,
}

/// qBittorrent Web API configuration.
///
/// Controls where the aggregation server logs in and where added
/// torrents are saved.
#[derive(Debug, Clone)]
pub struct QbConfig {
    /// Base URL of the qBittorrent Web UI, no trailing slash
    pub base_url: String,
    /// Web UI username
    pub username: String,
    /// Web UI password
    pub password: String,
    /// Save path submitted with every add request
    pub save_path: String,
    /// Per-call request timeout
    pub timeout: Duration,
}

impl Default for QbConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            username: "admin".to_string(),
            password: String::new(),
            save_path: "/downloads".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// TorAPI search backend configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the TorAPI instance, no trailing slash
    pub torapi_base: String,
    /// Search and magnet-resolution request timeout
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            torapi_base: "http://localhost:8443".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Dual-target IP egress probe configuration.
///
/// The two URLs point at peer IP-check services: one reached over the
/// normal route, one through the VPN network namespace.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// IP-check service on the normal egress
    pub normal_url: String,
    /// IP-check service on the VPN egress
    pub vpn_url: String,
    /// Per-probe request timeout
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            normal_url: "http://localhost:3000/test".to_string(),
            vpn_url: "http://localhost:3001/test".to_string(),
            timeout: Duration::from_secs(8),
        }
    }
}

/// Torrent-file download proxy configuration.
///
/// The allow-list pins the proxy to exactly one upstream host and path
/// so it cannot be used as an open proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL the aggregation server forwards `/api/torrent` to
    pub forward_base: String,
    /// The only upstream host the proxy will fetch from
    pub allowed_host: &'static str,
    /// The only upstream path the proxy will fetch from
    pub allowed_path: &'static str,
    /// Upstream fetch timeout
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            forward_base: "http://localhost:8090".to_string(),
            allowed_host: "rutracker.org",
            allowed_path: "/forum/dl.php",
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the aggregation server
    pub port: u16,
    /// Port for the download proxy
    pub proxy_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            proxy_port: 8090,
        }
    }
}

impl SkiffConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("QB_URL") {
            config.qbittorrent.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(user) = std::env::var("QB_USER") {
            config.qbittorrent.username = user;
        }
        if let Ok(pass) = std::env::var("QB_PASS") {
            config.qbittorrent.password = pass;
        }
        if let Ok(path) = std::env::var("QB_SAVE_PATH") {
            config.qbittorrent.save_path = path;
        }

        if let Ok(base) = std::env::var("TORAPI_BASE") {
            config.search.torapi_base = base.trim_end_matches('/').to_string();
        }

        if let Ok(url) = std::env::var("NORMAL_URL") {
            config.probe.normal_url = url;
        }
        if let Ok(url) = std::env::var("VPN_URL") {
            config.probe.vpn_url = url;
        }

        if let Ok(base) = std::env::var("DL_PROXY_URL") {
            config.proxy.forward_base = base.trim_end_matches('/').to_string();
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }
        if let Ok(port) = std::env::var("DL_PROXY_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.proxy_port = port;
            }
        }

        config
    }

    /// Creates a configuration pointing every collaborator at an
    /// unroutable port, for tests that must fail fast on transport.
    pub fn for_testing() -> Self {
        Self {
            qbittorrent: QbConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                timeout: Duration::from_millis(250),
                ..Default::default()
            },
            search: SearchConfig {
                torapi_base: "http://127.0.0.1:1".to_string(),
                timeout: Duration::from_millis(250),
            },
            probe: ProbeConfig {
                normal_url: "http://127.0.0.1:1/test".to_string(),
                vpn_url: "http://127.0.0.1:1/test".to_string(),
                timeout: Duration::from_millis(250),
            },
            proxy: ProxyConfig {
                forward_base: "http://127.0.0.1:1".to_string(),
                timeout: Duration::from_millis(250),
                ..Default::default()
            },
            server: ServerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SkiffConfig::default();

        assert_eq!(config.qbittorrent.save_path, "/downloads");
        assert_eq!(config.qbittorrent.timeout, Duration::from_secs(15));
        assert_eq!(config.search.timeout, Duration::from_secs(30));
        assert_eq!(config.probe.timeout, Duration::from_secs(8));
        assert_eq!(config.proxy.allowed_host, "rutracker.org");
        assert_eq!(config.proxy.allowed_path, "/forum/dl.php");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.proxy_port, 8090);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("QB_URL", "http://qb.example:9090/");
            std::env::set_var("QB_USER", "skiff");
            std::env::set_var("TORAPI_BASE", "http://torapi.example:8443");
            std::env::set_var("PORT", "9999");
        }

        let config = SkiffConfig::from_env();

        // Trailing slash is stripped so URL joins stay predictable
        assert_eq!(config.qbittorrent.base_url, "http://qb.example:9090");
        assert_eq!(config.qbittorrent.username, "skiff");
        assert_eq!(config.search.torapi_base, "http://torapi.example:8443");
        assert_eq!(config.server.port, 9999);

        // Cleanup
        unsafe {
            std::env::remove_var("QB_URL");
            std::env::remove_var("QB_USER");
            std::env::remove_var("TORAPI_BASE");
            std::env::remove_var("PORT");
        }
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        unsafe {
            std::env::set_var("DL_PROXY_PORT", "not-a-port");
        }

        let config = SkiffConfig::from_env();
        assert_eq!(config.server.proxy_port, 8090);

        unsafe {
            std::env::remove_var("DL_PROXY_PORT");
        }
    }
}
