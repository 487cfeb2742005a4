//! qBittorrent Web API session manager and REST wrapper.
//!
//! Every exposed operation is "login, then invoke, then discard the
//! session": at least two upstream round trips per call, no session
//! reuse, no cache. The `Origin`/`Referer` headers must exactly match
//! the qBittorrent base URL origin or the login is rejected upstream
//! (qBittorrent's CSRF protection).

mod session;
mod types;

pub use session::{Session, sid_from_headers};
pub use types::{AddReport, FlagsBefore, INFINITE_ETA, OpReport, TorrentFile, TorrentInfo};

use reqwest::header::{COOKIE, ORIGIN, REFERER};
use tracing::{debug, warn};

use crate::SkiffError;
use crate::config::QbConfig;
use crate::magnet::hash_from_magnet;

/// qBittorrent Web API client.
#[derive(Debug, Clone)]
pub struct QbClient {
    http: reqwest::Client,
    config: QbConfig,
}

impl QbClient {
    pub fn new(config: QbConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn api(&self, endpoint: &str) -> String {
        format!("{}/api/v2/{endpoint}", self.config.base_url)
    }

    /// Logs in and returns a single-operation session.
    ///
    /// # Errors
    /// - `SkiffError::UpstreamAuth` - qBittorrent answered without an `SID`
    ///   cookie; the status and body are kept for the 502 diagnostic
    /// - `SkiffError::Transport` - request failed or timed out
    pub async fn login(&self) -> crate::Result<Session> {
        let response = self
            .http
            .post(self.api("auth/login"))
            .header(ORIGIN, &self.config.base_url)
            .header(REFERER, format!("{}/", self.config.base_url))
            .form(&[
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        match sid_from_headers(response.headers()) {
            Some(sid) => {
                debug!("qBittorrent login ok");
                Ok(Session::new(sid))
            }
            None => {
                let body = response.text().await.unwrap_or_default();
                Err(SkiffError::UpstreamAuth {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    /// GET an authenticated JSON endpoint.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> crate::Result<T> {
        let response = self
            .http
            .get(self.api(endpoint))
            .query(query)
            .header(COOKIE, session.cookie())
            .header(ORIGIN, &self.config.base_url)
            .header(REFERER, format!("{}/", self.config.base_url))
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkiffError::UpstreamStatus {
                service: "qbittorrent",
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SkiffError::UpstreamPayload {
                service: "qbittorrent",
                reason: format!("{endpoint}: {e}"),
            })
    }

    /// POST an authenticated form endpoint, reporting status and body verbatim.
    async fn post_form(
        &self,
        session: &Session,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> crate::Result<OpReport> {
        let response = self
            .http
            .post(self.api(endpoint))
            .header(COOKIE, session.cookie())
            .header(ORIGIN, &self.config.base_url)
            .header(REFERER, format!("{}/", self.config.base_url))
            .form(form)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(OpReport {
            ok: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }

    /// Lists torrents, optionally filtered to specific hashes
    /// (pipe-joined, as the API expects).
    ///
    /// # Errors
    /// - `SkiffError::UpstreamAuth` - login failed
    /// - `SkiffError::UpstreamStatus` / `UpstreamPayload` - info query failed
    /// - `SkiffError::Transport` - request failed or timed out
    pub async fn torrents(&self, hashes: Option<&str>) -> crate::Result<Vec<TorrentInfo>> {
        let session = self.login().await?;
        let mut query = Vec::new();
        if let Some(hashes) = hashes {
            query.push(("hashes", hashes));
        }
        self.get_json(&session, "torrents/info", &query).await
    }

    /// Lists the files of one torrent.
    ///
    /// # Errors
    /// Same as [`QbClient::torrents`].
    pub async fn files(&self, hash: &str) -> crate::Result<Vec<TorrentFile>> {
        let session = self.login().await?;
        self.get_json(&session, "torrents/files", &[("hash", hash)])
            .await
    }

    /// Starts (resumes) a torrent.
    ///
    /// # Errors
    /// - `SkiffError::UpstreamAuth` - login failed
    /// - `SkiffError::Transport` - request failed or timed out
    pub async fn start(&self, hash: &str) -> crate::Result<OpReport> {
        let session = self.login().await?;
        self.post_form(&session, "torrents/start", &[("hashes", hash.to_string())])
            .await
    }

    /// Stops (pauses) a torrent.
    ///
    /// # Errors
    /// Same as [`QbClient::start`].
    pub async fn stop(&self, hash: &str) -> crate::Result<OpReport> {
        let session = self.login().await?;
        self.post_form(&session, "torrents/stop", &[("hashes", hash.to_string())])
            .await
    }

    /// Deletes a torrent, optionally with its files on disk.
    ///
    /// # Errors
    /// Same as [`QbClient::start`].
    pub async fn delete(&self, hash: &str, delete_files: bool) -> crate::Result<OpReport> {
        let session = self.login().await?;
        self.post_form(
            &session,
            "torrents/delete",
            &[
                ("hashes", hash.to_string()),
                ("deleteFiles", delete_files.to_string()),
            ],
        )
        .await
    }

    /// Sets the priority of a batch of files within one torrent.
    ///
    /// File ids are pipe-joined as the API expects; priority 0 skips,
    /// anything greater downloads.
    ///
    /// # Errors
    /// - `SkiffError::BadRequest` - empty file id list
    /// - otherwise same as [`QbClient::start`]
    pub async fn set_file_priority(
        &self,
        hash: &str,
        file_ids: &[i64],
        priority: i64,
    ) -> crate::Result<OpReport> {
        if file_ids.is_empty() {
            return Err(SkiffError::bad_request("fileIds must not be empty"));
        }
        let ids = file_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("|");

        let session = self.login().await?;
        self.post_form(
            &session,
            "torrents/filePrio",
            &[
                ("hash", hash.to_string()),
                ("id", ids),
                ("priority", priority.to_string()),
            ],
        )
        .await
    }

    /// Submits a magnet to qBittorrent (multipart form, fixed save path).
    async fn submit_magnet(&self, session: &Session, magnet: &str) -> crate::Result<OpReport> {
        let form = reqwest::multipart::Form::new()
            .text("urls", magnet.to_string())
            .text("savepath", self.config.save_path.clone());

        let response = self
            .http
            .post(self.api("torrents/add"))
            .header(COOKIE, session.cookie())
            .header(ORIGIN, &self.config.base_url)
            .header(REFERER, format!("{}/", self.config.base_url))
            .multipart(form)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(OpReport {
            ok: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }

    async fn toggle(&self, session: &Session, endpoint: &str, hash: &str) -> crate::Result<OpReport> {
        self.post_form(session, endpoint, &[("hashes", hash.to_string())])
            .await
    }

    /// Adds a magnet and switches it to streaming-friendly ordering.
    ///
    /// The only multi-step orchestration in the system, one login for the
    /// whole flow:
    ///
    /// 1. extract the info-hash from the magnet (fails the operation when
    ///    no `btih` is present);
    /// 2. submit the magnet;
    /// 3. re-query `torrents/info` for that hash: when the torrent is not
    ///    yet visible (race with qBittorrent's internal processing), return
    ///    success-with-warning instead of retrying or blocking;
    /// 4. toggle sequential download and first/last-piece priority on
    ///    where not already enabled.
    ///
    /// Not transactional: a toggle failure leaves the torrent added with
    /// default flags and is reported as a warning.
    ///
    /// # Errors
    /// - `SkiffError::UpstreamPayload` - no info-hash extractable, or the
    ///   add call was rejected
    /// - `SkiffError::UpstreamAuth` / `Transport` - login or request failed
    pub async fn add_magnet(&self, magnet: &str) -> crate::Result<AddReport> {
        let hash = hash_from_magnet(magnet).ok_or_else(|| SkiffError::UpstreamPayload {
            service: "torapi",
            reason: "no btih hash in magnet link".to_string(),
        })?;

        let session = self.login().await?;

        let add = self.submit_magnet(&session, magnet).await?;
        if !add.ok {
            return Err(SkiffError::UpstreamStatus {
                service: "qbittorrent",
                status: add.status,
            });
        }

        let seen = self
            .get_json::<Vec<TorrentInfo>>(&session, "torrents/info", &[("hashes", hash.as_str())])
            .await?;

        let Some(info) = seen.into_iter().next() else {
            warn!(%hash, "torrent not yet visible after add; leaving flags at defaults");
            return Ok(AddReport {
                hash,
                added: true,
                before: None,
                actions: Vec::new(),
                warning: Some("torrent not yet visible; streaming flags left at defaults".to_string()),
            });
        };

        let before = FlagsBefore {
            seq_dl: info.seq_dl,
            f_l_piece_prio: info.f_l_piece_prio,
        };
        let mut actions = Vec::new();
        let mut warning = None;

        if !info.seq_dl {
            match self
                .toggle(&session, "torrents/toggleSequentialDownload", &hash)
                .await
            {
                Ok(report) if report.ok => actions.push("toggleSequentialDownload".to_string()),
                Ok(report) => {
                    warning = Some(format!(
                        "toggleSequentialDownload failed with status {}",
                        report.status
                    ));
                }
                Err(e) => warning = Some(format!("toggleSequentialDownload failed: {e}")),
            }
        }

        if !info.f_l_piece_prio {
            match self
                .toggle(&session, "torrents/toggleFirstLastPiecePrio", &hash)
                .await
            {
                Ok(report) if report.ok => actions.push("toggleFirstLastPiecePrio".to_string()),
                Ok(report) => {
                    warning = Some(format!(
                        "toggleFirstLastPiecePrio failed with status {}",
                        report.status
                    ));
                }
                Err(e) => warning = Some(format!("toggleFirstLastPiecePrio failed: {e}")),
            }
        }

        Ok(AddReport {
            hash,
            added: true,
            before: Some(before),
            actions,
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn unreachable_client() -> QbClient {
        QbClient::new(QbConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_millis(250),
            ..Default::default()
        })
    }

    #[test]
    fn test_api_url_construction() {
        let client = QbClient::new(QbConfig {
            base_url: "http://qb.local:8081".to_string(),
            ..Default::default()
        });
        assert_eq!(
            client.api("torrents/info"),
            "http://qb.local:8081/api/v2/torrents/info"
        );
    }

    #[tokio::test]
    async fn test_add_magnet_without_hash_fails_before_any_call() {
        // No btih in the magnet: the flow must fail without touching the
        // (unreachable) upstream, so the error is a payload error, not
        // transport.
        let client = unreachable_client();
        let err = client.add_magnet("magnet:?dn=NoHashHere").await.unwrap_err();
        assert!(matches!(err, SkiffError::UpstreamPayload { .. }));
    }

    #[tokio::test]
    async fn test_login_transport_error_surfaces() {
        let client = unreachable_client();
        let err = client.login().await.unwrap_err();
        assert!(matches!(err, SkiffError::Transport(_)));
    }

    #[tokio::test]
    async fn test_empty_file_ids_rejected() {
        let client = unreachable_client();
        let err = client.set_file_priority("ff", &[], 1).await.unwrap_err();
        assert!(matches!(err, SkiffError::BadRequest { .. }));
    }
}
