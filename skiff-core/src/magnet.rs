//! Info-hash extraction from magnet URIs.
//!
//! Grammar: a magnet URI carries the BitTorrent info-hash in an
//! `xt=urn:btih:<hex>` parameter, 40 hex digits, any case. The hash is
//! the only stable identifier correlating search results, UI rows, and
//! qBittorrent operations, so extraction failure fails the whole
//! add-torrent operation upstream of any qBittorrent call.

use std::sync::LazyLock;

use regex::Regex;

static BTIH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)xt=urn:btih:([0-9a-f]{40})").expect("btih pattern is valid")
});

/// Extracts the info-hash from a magnet URI, normalized to lowercase hex.
///
/// Returns `None` when the URI carries no `xt=urn:btih:<40 hex>` parameter.
/// Matching is case-insensitive in both the parameter name and the digits.
pub fn hash_from_magnet(magnet: &str) -> Option<String> {
    BTIH.captures(magnet)
        .map(|caps| caps[1].to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_extracts_lowercase_hash() {
        let magnet = format!("magnet:?xt=urn:btih:{HASH}&dn=Some.Movie.2024");
        assert_eq!(hash_from_magnet(&magnet).as_deref(), Some(HASH));
    }

    #[test]
    fn test_uppercase_hash_is_normalized() {
        let magnet = format!(
            "magnet:?xt=urn:btih:{}&tr=udp%3A%2F%2Ftracker",
            HASH.to_ascii_uppercase()
        );
        assert_eq!(hash_from_magnet(&magnet).as_deref(), Some(HASH));
    }

    #[test]
    fn test_parameter_name_case_insensitive() {
        let magnet = format!("magnet:?XT=URN:BTIH:{HASH}");
        assert_eq!(hash_from_magnet(&magnet).as_deref(), Some(HASH));
    }

    #[test]
    fn test_hash_not_first_parameter() {
        let magnet = format!("magnet:?dn=Name&xt=urn:btih:{HASH}");
        assert_eq!(hash_from_magnet(&magnet).as_deref(), Some(HASH));
    }

    #[test]
    fn test_no_btih_returns_none() {
        assert_eq!(hash_from_magnet("magnet:?dn=Name.Only"), None);
        assert_eq!(hash_from_magnet("https://example.com/?xt=foo"), None);
        assert_eq!(hash_from_magnet(""), None);
    }

    #[test]
    fn test_short_hash_returns_none() {
        // 39 hex digits is not an info-hash
        let magnet = format!("magnet:?xt=urn:btih:{}", &HASH[..39]);
        assert_eq!(hash_from_magnet(&magnet), None);
    }

    #[test]
    fn test_non_hex_hash_returns_none() {
        let magnet = "magnet:?xt=urn:btih:zzzz56789abcdef0123456789abcdef01234567";
        assert_eq!(hash_from_magnet(magnet), None);
    }
}
