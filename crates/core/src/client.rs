//! HTTP fetch adapter for the upstream Voidly API.
//!
//! One GET per call: no retries, no caching, no request deduplication.
//! Timeouts are whatever reqwest defaults to; a slow upstream stalls only
//! the request that hit it.

use crate::config::VoidlyConfig;
use crate::error::{Error, Result};
use crate::types::{CountryRecord, IncidentFeed, IndexSnapshot};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("voidly-mcp/", env!("CARGO_PKG_VERSION"));

/// Client for the Voidly censorship-index and data APIs.
#[derive(Debug, Clone)]
pub struct VoidlyClient {
    http: reqwest::Client,
    config: VoidlyConfig,
}

impl VoidlyClient {
    /// Create a client with `Accept: application/json` and an identifying
    /// user agent baked into every request.
    pub fn new(config: VoidlyConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the global index snapshot.
    pub async fn censorship_index(&self) -> Result<IndexSnapshot> {
        self.get_json(self.api_url("v1/censorship-index")?).await
    }

    /// Fetch the detail record for one country. `code` is used verbatim;
    /// callers upper-case it first.
    pub async fn country(&self, code: &str) -> Result<CountryRecord> {
        self.get_json(self.api_url(&format!("v1/censorship-index/{code}"))?)
            .await
    }

    /// Fetch the active incident feed.
    pub async fn incidents(&self) -> Result<IncidentFeed> {
        self.get_json(self.api_url("v1/censorship-index/incidents")?)
            .await
    }

    /// Fetch the global index as pretty-printed JSON (resource passthrough).
    pub async fn censorship_index_raw(&self) -> Result<String> {
        self.get_pretty(self.api_url("v1/censorship-index")?).await
    }

    /// Fetch the methodology document as pretty-printed JSON.
    pub async fn methodology_raw(&self) -> Result<String> {
        let url = self
            .config
            .data_api_base
            .join("methodology")
            .map_err(|e| Error::Config(format!("invalid methodology URL: {e}")))?;
        self.get_pretty(url).await
    }

    /// One GET, decoded into `T`. Non-2xx and undecodable bodies are both
    /// upstream faults.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let (status, body) = self.fetch(url).await?;
        serde_json::from_str(&body).map_err(|e| Error::Upstream {
            status: status.as_u16(),
            message: format!("invalid JSON body: {e}"),
        })
    }

    async fn get_pretty(&self, url: Url) -> Result<String> {
        let value: serde_json::Value = self.get_json(url).await?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    async fn fetch(&self, url: Url) -> Result<(reqwest::StatusCode, String)> {
        debug!(url = %url, "GET request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::from_response(status, &body));
        }
        Ok((status, body))
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        self.config
            .api_base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid API URL '{path}': {e}")))
    }
}
