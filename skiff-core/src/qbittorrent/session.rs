//! qBittorrent session-cookie handling.
//!
//! Grammar: a successful login answers with a `Set-Cookie` header of the
//! form `SID=<token>; ...`. The token is everything up to the first `;`.
//! Sessions are never cached: every exposed operation logs in fresh and
//! discards the cookie afterward, so qBittorrent alone owns session
//! lifetime.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{HeaderMap, SET_COOKIE};

static SID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SID=([^;]+)").expect("sid pattern is valid"));

/// One authenticated qBittorrent session, alive for a single operation.
#[derive(Debug, Clone)]
pub struct Session {
    sid: String,
}

impl Session {
    pub fn new(sid: String) -> Self {
        Self { sid }
    }

    /// The `Cookie` header value to attach to authenticated calls.
    pub fn cookie(&self) -> String {
        format!("SID={}", self.sid)
    }

    /// The raw session token.
    pub fn sid(&self) -> &str {
        &self.sid
    }
}

/// Scrapes the SID token out of a response's `Set-Cookie` headers.
///
/// Returns `None` when no `SID=` cookie is present, which is how
/// qBittorrent signals a rejected login even on a 200.
pub fn sid_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| SID.captures(cookie).map(|caps| caps[1].to_string()))
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn headers_with(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_sid_extracted_up_to_semicolon() {
        let headers = headers_with(&["SID=abc123DEF; path=/; HttpOnly"]);
        assert_eq!(sid_from_headers(&headers).as_deref(), Some("abc123DEF"));
    }

    #[test]
    fn test_sid_without_attributes() {
        let headers = headers_with(&["SID=tok"]);
        assert_eq!(sid_from_headers(&headers).as_deref(), Some("tok"));
    }

    #[test]
    fn test_sid_among_other_cookies() {
        let headers = headers_with(&[
            "theme=dark; path=/",
            "SID=zzz999; path=/; SameSite=Strict",
        ]);
        assert_eq!(sid_from_headers(&headers).as_deref(), Some("zzz999"));
    }

    #[test]
    fn test_no_sid_returns_none() {
        let headers = headers_with(&["theme=dark; path=/"]);
        assert_eq!(sid_from_headers(&headers), None);
        assert_eq!(sid_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_format() {
        let session = Session::new("abc".to_string());
        assert_eq!(session.cookie(), "SID=abc");
        assert_eq!(session.sid(), "abc");
    }
}
