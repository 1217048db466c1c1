//! HTTP client for the remote thought service.
//!
//! Endpoints:
//! - `GET {base_url}/api/thoughts?folder={key}` -> `{ "items": [ThoughtRecord] }`
//! - `GET {base_url}/api/folders` -> `[{ "key": .., "name": .. }]`
//!
//! Uses blocking `ureq` calls with a per-request timeout. There is no retry;
//! callers decide whether a failed fetch is worth repeating.

use super::thought_store::{StoreError, StoreResult, ThoughtStore};
use crate::model::thought::ThoughtRecord;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the remote thought service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStoreConfig {
    /// Service root without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// Folder catalogue entry served by `/api/folders`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderInfo {
    pub key: String,
    pub name: String,
}

/// Envelope of `/api/thoughts`; a missing or null `items` means an empty folder.
#[derive(Debug, Default, Deserialize)]
pub struct ThoughtListEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<ThoughtRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ThoughtRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<ThoughtRecord>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ThoughtListEnvelope {
    /// Validates every record and unwraps the list.
    pub fn into_records(self) -> StoreResult<Vec<ThoughtRecord>> {
        for record in &self.items {
            record.validate()?;
        }
        Ok(self.items)
    }
}

/// Remote store reached over HTTP.
pub struct HttpThoughtStore {
    config: HttpStoreConfig,
    agent: ureq::Agent,
}

impl HttpThoughtStore {
    pub fn new(config: HttpStoreConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    pub fn config(&self) -> &HttpStoreConfig {
        &self.config
    }

    /// Lists the folders the service knows about.
    pub fn list_folders(&self) -> StoreResult<Vec<FolderInfo>> {
        let url = self.config.endpoint("/api/folders");
        let response = self.send(self.agent.get(&url), &url)?;
        response
            .into_json::<Vec<FolderInfo>>()
            .map_err(|err| StoreError::InvalidData(format!("folders response: {err}")))
    }

    fn send(&self, request: ureq::Request, url: &str) -> StoreResult<ureq::Response> {
        let started_at = Instant::now();
        match request.call() {
            Ok(response) => {
                debug!(
                    "event=store_request module=repo status=ok http_status={} duration_ms={}",
                    response.status(),
                    started_at.elapsed().as_millis()
                );
                Ok(response)
            }
            Err(ureq::Error::Status(code, _)) => {
                warn!(
                    "event=store_request module=repo status=error error_code=http_status http_status={code} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Err(StoreError::Status {
                    code,
                    url: url.to_string(),
                })
            }
            Err(err) => {
                warn!(
                    "event=store_request module=repo status=error error_code=transport duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Err(StoreError::Transport(err.to_string()))
            }
        }
    }
}

impl ThoughtStore for HttpThoughtStore {
    fn list_by_folder(&self, folder: &str) -> StoreResult<Vec<ThoughtRecord>> {
        let url = self.config.endpoint("/api/thoughts");
        let request = self.agent.get(&url).query("folder", folder);
        let response = self.send(request, &url)?;
        response
            .into_json::<ThoughtListEnvelope>()
            .map_err(|err| {
                StoreError::InvalidData(format!("thoughts response for `{folder}`: {err}"))
            })?
            .into_records()
    }
}
