//! Property tests for the pure parsing functions.

use proptest::prelude::*;
use skiff_core::hash_from_magnet;
use skiff_search::Provider;

proptest! {
    /// A known hash embedded in any synthetic magnet string round-trips
    /// back out, lowercased, regardless of casing or surrounding
    /// parameters.
    #[test]
    fn hash_round_trips_through_synthetic_magnets(
        hash in "[0-9a-fA-F]{40}",
        name in "[A-Za-z0-9. ]{0,30}",
        tracker in "[a-z0-9.]{0,20}",
    ) {
        let magnet = format!(
            "magnet:?dn={name}&xt=urn:btih:{hash}&tr=udp%3A%2F%2F{tracker}"
        );
        prop_assert_eq!(
            hash_from_magnet(&magnet),
            Some(hash.to_ascii_lowercase())
        );
    }

    /// Too-short hex runs never match.
    #[test]
    fn short_hashes_never_match(hash in "[0-9a-f]{1,39}") {
        let magnet = format!("magnet:?xt=urn:btih:{hash}&dn=x");
        prop_assert_eq!(hash_from_magnet(&magnet), None);
    }

    /// Strings with no btih parameter never match.
    #[test]
    fn urls_without_btih_never_match(path in "[A-Za-z0-9/]{0,40}") {
        let url = format!("https://example.com/{path}");
        prop_assert_eq!(hash_from_magnet(&url), None);
    }

    /// Any casing of a known provider name normalizes to the same
    /// variant, whose canonical name matches ignoring case.
    #[test]
    fn provider_normalization_ignores_case(
        name in proptest::sample::select(vec!["rutracker", "kinozal", "rutor", "nonameclub"]),
        mask in any::<u32>(),
    ) {
        let mixed: String = name
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if mask & (1 << (i % 32)) != 0 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect();
        let provider: Provider = mixed.parse().unwrap();
        prop_assert!(provider.as_str().eq_ignore_ascii_case(name));
    }
}
