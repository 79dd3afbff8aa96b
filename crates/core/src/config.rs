//! Configuration for the upstream Voidly endpoints.

use crate::error::{Error, Result};
use url::Url;

/// Environment variable overriding the main API base URL.
pub const API_ENV: &str = "VOIDLY_API";
/// Environment variable overriding the data API base URL.
pub const DATA_API_ENV: &str = "VOIDLY_DATA_API";

const DEFAULT_API: &str = "https://api.voidly.net";
const DEFAULT_DATA_API: &str = "https://data.voidly.net";

/// Base URLs for the two upstream services.
#[derive(Debug, Clone)]
pub struct VoidlyConfig {
    /// Base URL of the censorship-index API.
    pub api_base: Url,
    /// Base URL of the data/methodology API.
    pub data_api_base: Url,
}

impl VoidlyConfig {
    /// Build a configuration from `VOIDLY_API` / `VOIDLY_DATA_API`,
    /// falling back to the public endpoints.
    pub fn from_env() -> Result<Self> {
        let api = std::env::var(API_ENV).unwrap_or_else(|_| DEFAULT_API.to_string());
        let data_api = std::env::var(DATA_API_ENV).unwrap_or_else(|_| DEFAULT_DATA_API.to_string());
        Self::new(&api, &data_api)
    }

    /// Build a configuration from explicit base URLs.
    pub fn new(api_base: &str, data_api_base: &str) -> Result<Self> {
        Ok(Self {
            api_base: parse_base(api_base)?,
            data_api_base: parse_base(data_api_base)?,
        })
    }
}

impl Default for VoidlyConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API).expect("default API URL is valid"),
            data_api_base: Url::parse(DEFAULT_DATA_API).expect("default data API URL is valid"),
        }
    }
}

// A single trailing slash keeps `Url::join` from eating the last path
// segment of subpath bases.
fn parse_base(raw: &str) -> Result<Url> {
    let trimmed = raw.trim_end_matches('/');
    Url::parse(&format!("{trimmed}/"))
        .map_err(|e| Error::Config(format!("invalid base URL '{raw}': {e}")))
}
