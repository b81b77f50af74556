use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use resin_core::RawSnapshot;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("daily-note request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream rejected the request (retcode {retcode}): {message}")]
    Upstream { retcode: i64, message: String },
}

/// Source of account snapshots. A cycle aborts on any fetch failure, before
/// alert evaluation; only this seam talks to the account API.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    async fn fetch(&self) -> Result<RawSnapshot, FetchError>;
}

/// Standard HoYoLab response envelope around the actual payload.
#[derive(Deserialize)]
struct Envelope {
    retcode: i64,
    #[serde(default)]
    message: String,
    data: Option<RawSnapshot>,
}

/// Daily-note fetcher against the HoYoLab battle-chronicle API, authenticated
/// by the v2 session cookies.
pub struct HoyolabClient {
    http: reqwest::Client,
    base_url: String,
    cookie: String,
    uid: u64,
    server: String,
}

impl HoyolabClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cookie: format!(
                "ltoken_v2={}; ltuid_v2={}",
                config.ltoken_v2, config.ltuid_v2
            ),
            uid: config.genshin_uid,
            server: config.genshin_server.clone(),
        })
    }
}

#[async_trait]
impl SnapshotFetcher for HoyolabClient {
    async fn fetch(&self) -> Result<RawSnapshot, FetchError> {
        let url = format!("{}/game_record/genshin/api/dailyNote", self.base_url);
        let envelope: Envelope = self
            .http
            .get(&url)
            .query(&[
                ("role_id", self.uid.to_string()),
                ("server", self.server.clone()),
            ])
            .header(reqwest::header::COOKIE, self.cookie.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if envelope.retcode != 0 {
            return Err(FetchError::Upstream {
                retcode: envelope.retcode,
                message: envelope.message,
            });
        }
        Ok(envelope.data.unwrap_or_default())
    }
}
