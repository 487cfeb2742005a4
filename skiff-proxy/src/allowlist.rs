//! Upstream allow-list.
//!
//! The proxy serves exactly one host and path; everything else is
//! rejected before any outbound request is made, so the service cannot
//! be used as an open proxy. Matching is exact: same host with a
//! different path fails, and so does the same path on a different host.

use url::Url;

/// Validates a download target against the allow-list.
///
/// Returns the parsed URL on success so the caller fetches exactly what
/// was validated.
///
/// # Errors
/// A human-readable reason, surfaced as a 400 to the caller.
pub fn check_target(
    target: &str,
    allowed_host: &str,
    allowed_path: &str,
) -> Result<Url, String> {
    let url = Url::parse(target).map_err(|e| format!("Invalid url: {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("Unsupported scheme: {}", url.scheme()));
    }

    let host = url.host_str().unwrap_or_default();
    if host != allowed_host || url.path() != allowed_path {
        return Err(format!("Only {allowed_host}{allowed_path} supported"));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "rutracker.org";
    const PATH: &str = "/forum/dl.php";

    #[test]
    fn test_exact_match_accepted() {
        let url = check_target("https://rutracker.org/forum/dl.php?t=123", HOST, PATH).unwrap();
        assert_eq!(url.host_str(), Some("rutracker.org"));
        assert_eq!(url.query(), Some("t=123"));
    }

    #[test]
    fn test_http_scheme_accepted() {
        assert!(check_target("http://rutracker.org/forum/dl.php?t=1", HOST, PATH).is_ok());
    }

    #[test]
    fn test_same_host_different_path_rejected() {
        assert!(check_target("https://rutracker.org/forum/viewtopic.php?t=1", HOST, PATH).is_err());
        assert!(check_target("https://rutracker.org/dl.php?t=1", HOST, PATH).is_err());
    }

    #[test]
    fn test_different_host_same_path_rejected() {
        assert!(check_target("https://evil.example/forum/dl.php?t=1", HOST, PATH).is_err());
        // Subdomains are different hosts
        assert!(check_target("https://www.rutracker.org/forum/dl.php?t=1", HOST, PATH).is_err());
    }

    #[test]
    fn test_garbage_and_non_http_rejected() {
        assert!(check_target("not a url", HOST, PATH).is_err());
        assert!(check_target("ftp://rutracker.org/forum/dl.php", HOST, PATH).is_err());
        assert!(check_target("file:///etc/passwd", HOST, PATH).is_err());
    }
}
