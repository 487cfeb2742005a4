//! Data types for TorAPI search responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What `/api/search/title/…` answered with.
///
/// TorAPI normally returns JSON, but the passthrough contract keeps a
/// non-JSON body as raw text instead of failing.
#[derive(Debug, Clone)]
pub enum SearchPayload {
    Json(Value),
    Raw(String),
}

/// One search result row, tagged with the provider it came from.
///
/// Field names mirror TorAPI's capitalized keys; `Seeds`/`Peers` stay
/// loose because some trackers report them as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Human-readable size string, e.g. "1.4 GB"
    #[serde(rename = "Size", default)]
    pub size: String,
    #[serde(rename = "Seeds", default)]
    pub seeds: Value,
    #[serde(rename = "Peers", default)]
    pub peers: Value,
    #[serde(rename = "Date", default)]
    pub date: Value,
    /// Topic page URL
    #[serde(rename = "Url", default)]
    pub url: String,
    /// Direct torrent-file URL, when the tracker exposes one
    #[serde(rename = "Torrent", default)]
    pub torrent: String,
    /// Opaque id used to resolve a magnet link
    #[serde(rename = "Id", default)]
    pub id: String,
}

/// Collapses TorAPI's `{provider: [items…]}` map into one tagged list.
///
/// Accepts both the bare map and the `{data: {provider: […]}}` nesting
/// some TorAPI versions answer with. Entries that are not arrays of
/// objects are skipped.
pub fn flatten_results(data: &Value) -> Vec<SearchItem> {
    let map = match data {
        Value::Object(map) if map.values().any(Value::is_array) => map,
        Value::Object(map) => match map.get("data") {
            Some(Value::Object(inner)) => inner,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let mut items = Vec::new();
    for (provider, entries) in map {
        let Value::Array(entries) = entries else {
            continue;
        };
        for entry in entries {
            match serde_json::from_value::<SearchItem>(entry.clone()) {
                Ok(mut item) => {
                    item.provider = provider.clone();
                    items.push(item);
                }
                Err(_) => continue,
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_flatten_provider_keyed_map() {
        let data = json!({
            "RuTracker": [
                {"Name": "Movie.2024.1080p", "Size": "1.4 GB", "Seeds": 12,
                 "Peers": 3, "Date": "2024-05-01", "Url": "https://rutracker.org/forum/viewtopic.php?t=1",
                 "Torrent": "https://rutracker.org/forum/dl.php?t=1", "Id": "1"}
            ],
            "Kinozal": [
                {"Name": "Show.S01", "Size": "700 MB", "Seeds": "5", "Id": "77"}
            ]
        });

        let mut items = flatten_results(&data);
        items.sort_by(|a, b| a.provider.cmp(&b.provider));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].provider, "Kinozal");
        assert_eq!(items[0].id, "77");
        assert_eq!(items[1].provider, "RuTracker");
        assert_eq!(items[1].name, "Movie.2024.1080p");
        // Seeds stays loose: number on one tracker, string on another
        assert_eq!(items[1].seeds, json!(12));
        assert_eq!(items[0].seeds, json!("5"));
    }

    #[test]
    fn test_flatten_nested_data_key() {
        let data = json!({
            "data": {
                "RuTor": [{"Name": "x", "Id": "9"}]
            }
        });
        let items = flatten_results(&data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].provider, "RuTor");
    }

    #[test]
    fn test_flatten_non_map_is_empty() {
        assert!(flatten_results(&json!([1, 2, 3])).is_empty());
        assert!(flatten_results(&json!("text")).is_empty());
        assert!(flatten_results(&json!({"message": "no results"})).is_empty());
    }
}
