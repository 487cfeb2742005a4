//! TorAPI HTTP client.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::errors::SearchError;
use crate::provider::Provider;
use crate::types::SearchPayload;

/// Client for one TorAPI instance.
#[derive(Debug, Clone)]
pub struct TorApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl TorApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    /// Title search across one provider (or all of them).
    ///
    /// The body is passed through: valid JSON is returned parsed,
    /// anything else is returned as raw text rather than an error.
    ///
    /// # Errors
    /// - `SearchError::SearchFailed` - TorAPI answered a non-success status
    /// - `SearchError::Network` - request failed or timed out
    pub async fn search_title(
        &self,
        query: &str,
        provider: Provider,
    ) -> crate::Result<SearchPayload> {
        let url = format!(
            "{}/api/search/title/{}?query={}",
            self.base_url,
            provider.as_str(),
            urlencoding::encode(query)
        );
        debug!(%url, "torapi title search");

        let response = self.http.get(&url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::SearchFailed {
                query: query.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(SearchPayload::Json(value)),
            Err(_) => Ok(SearchPayload::Raw(text)),
        }
    }

    /// Resolves a magnet link for a provider-specific topic id.
    ///
    /// # Errors
    /// - `SearchError::SearchFailed` - TorAPI answered a non-success status
    /// - `SearchError::MagnetNotFound` - payload carried no usable magnet
    /// - `SearchError::Network` - request failed or timed out
    pub async fn resolve_magnet(&self, provider: Provider, id: &str) -> crate::Result<String> {
        let url = format!(
            "{}/api/search/id/{}?query={}",
            self.base_url,
            provider.as_str(),
            urlencoding::encode(id)
        );
        debug!(%url, "torapi magnet resolution");

        let response = self.http.get(&url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::SearchFailed {
                query: id.to_string(),
                status: status.as_u16(),
            });
        }

        let payload = response.json::<Value>().await.map_err(SearchError::from)?;
        first_magnet(&payload).ok_or_else(|| SearchError::MagnetNotFound {
            provider: provider.to_string(),
            id: id.to_string(),
        })
    }
}

/// Finds the first non-empty `Magnet` field in a TorAPI payload.
///
/// Handles both response shapes: a bare item array, and the
/// provider-keyed map of item arrays.
fn first_magnet(payload: &Value) -> Option<String> {
    match payload {
        Value::Array(items) => items.iter().find_map(magnet_of),
        Value::Object(map) => map.values().find_map(first_magnet),
        _ => None,
    }
}

fn magnet_of(item: &Value) -> Option<String> {
    match item.get("Magnet") {
        Some(Value::String(magnet)) if !magnet.is_empty() => Some(magnet.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_magnet_from_item_array() {
        let payload = json!([
            {"Name": "x", "Magnet": ""},
            {"Name": "y", "Magnet": "magnet:?xt=urn:btih:aa"}
        ]);
        assert_eq!(
            first_magnet(&payload).as_deref(),
            Some("magnet:?xt=urn:btih:aa")
        );
    }

    #[test]
    fn test_first_magnet_from_provider_map() {
        let payload = json!({
            "RuTracker": [{"Magnet": "magnet:?xt=urn:btih:bb"}]
        });
        assert_eq!(
            first_magnet(&payload).as_deref(),
            Some("magnet:?xt=urn:btih:bb")
        );
    }

    #[test]
    fn test_first_magnet_absent() {
        assert_eq!(first_magnet(&json!([{"Name": "x"}])), None);
        assert_eq!(first_magnet(&json!({"RuTracker": []})), None);
        assert_eq!(first_magnet(&json!(null)), None);
    }

    #[tokio::test]
    async fn test_unreachable_torapi_is_network_error() {
        let client = TorApiClient::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_millis(250),
        );
        let err = client
            .resolve_magnet(Provider::RuTracker, "123")
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
    }
}
