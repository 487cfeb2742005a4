//! Response shapes borrowed from the qBittorrent Web API.
//!
//! Nothing here is owned or persisted locally; these mirror what
//! `/api/v2/torrents/info` and `/api/v2/torrents/files` answer with,
//! field names unchanged so they round-trip to the UI untouched.

use serde::{Deserialize, Serialize};

/// ETA sentinel qBittorrent uses for "infinite".
pub const INFINITE_ETA: i64 = 8_640_000;

/// One torrent as reported by `/api/v2/torrents/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentInfo {
    /// Lowercase hex info-hash, the only stable identifier
    pub hash: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_size: i64,
    /// Completion fraction, 0..1
    #[serde(default)]
    pub progress: f64,
    /// Bytes already downloaded
    #[serde(default)]
    pub completed: i64,
    /// Download speed in bytes/sec
    #[serde(default)]
    pub dlspeed: i64,
    /// Upload speed in bytes/sec
    #[serde(default)]
    pub upspeed: i64,
    #[serde(default)]
    pub num_seeds: i64,
    #[serde(default)]
    pub num_leechs: i64,
    /// Seconds remaining; `INFINITE_ETA` means unknown/infinite
    #[serde(default)]
    pub eta: i64,
    /// Free-text status token, e.g. `downloading`, `stalledUP`
    #[serde(default)]
    pub state: String,
    /// Sequential-download strategy enabled
    #[serde(default)]
    pub seq_dl: bool,
    /// First/last-piece-priority strategy enabled
    #[serde(default)]
    pub f_l_piece_prio: bool,
}

/// One file as reported by `/api/v2/torrents/files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentFile {
    #[serde(default)]
    pub index: i64,
    pub name: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub progress: f64,
    /// 0 = skip, >0 = download
    #[serde(default)]
    pub priority: i64,
}

/// Raw outcome of one qBittorrent mutation call.
///
/// Mutations (start/stop/delete/add/priority) answer with plain-text
/// bodies; the status and body are forwarded verbatim so the caller can
/// surface them.
#[derive(Debug, Clone, Serialize)]
pub struct OpReport {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

/// Streaming flags as they stood before the add flow toggled them.
#[derive(Debug, Clone, Serialize)]
pub struct FlagsBefore {
    pub seq_dl: bool,
    pub f_l_piece_prio: bool,
}

/// Report of the whole add-magnet orchestration.
///
/// `before` is `None` when the post-add info query lost the race with
/// qBittorrent's internal processing; in that case no toggles were
/// attempted and `warning` says so. The flow is not transactional: a
/// toggle failure leaves the torrent added with default flags.
#[derive(Debug, Clone, Serialize)]
pub struct AddReport {
    pub hash: String,
    pub added: bool,
    pub before: Option<FlagsBefore>,
    /// Toggle calls actually issued, in order
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torrent_info_deserializes_qb_payload() {
        let json = r#"{
            "hash": "0123456789abcdef0123456789abcdef01234567",
            "name": "Some.Movie.2024",
            "total_size": 1073741824,
            "progress": 0.42,
            "completed": 451000000,
            "dlspeed": 1048576,
            "upspeed": 2048,
            "num_seeds": 12,
            "num_leechs": 3,
            "eta": 3600,
            "state": "downloading",
            "seq_dl": false,
            "f_l_piece_prio": false,
            "category": "movies",
            "save_path": "/downloads"
        }"#;

        let info: TorrentInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.hash, "0123456789abcdef0123456789abcdef01234567");
        assert_eq!(info.total_size, 1_073_741_824);
        assert!(!info.seq_dl);
        assert_eq!(info.eta, 3600);
    }

    #[test]
    fn test_torrent_info_tolerates_missing_fields() {
        // Older qB versions omit fields; only the hash is required.
        let info: TorrentInfo =
            serde_json::from_str(r#"{"hash": "ff", "name": "x"}"#).unwrap();
        assert_eq!(info.progress, 0.0);
        assert_eq!(info.state, "");
        assert!(!info.f_l_piece_prio);
    }

    #[test]
    fn test_file_priority_zero_means_skip() {
        let file: TorrentFile = serde_json::from_str(
            r#"{"index": 0, "name": "sample.mkv", "size": 100, "progress": 0.0, "priority": 0}"#,
        )
        .unwrap();
        assert_eq!(file.priority, 0);
    }

    #[test]
    fn test_add_report_omits_absent_warning() {
        let report = AddReport {
            hash: "ff".to_string(),
            added: true,
            before: Some(FlagsBefore {
                seq_dl: false,
                f_l_piece_prio: true,
            }),
            actions: vec!["toggleSequentialDownload".to_string()],
            warning: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("warning"));
        assert!(json.contains("toggleSequentialDownload"));
    }
}
