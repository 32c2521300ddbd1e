//! Runtime configuration for the Alpha Vantage client.

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::options::TransportOptions;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";
/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "ALPHA_VANTAGE_API_BASE";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "ALPHA_VANTAGE_TIMEOUT_SECS";
/// Environment variable holding an optional proxy URL.
pub const PROXY_VAR: &str = "ALPHA_VANTAGE_PROXY";

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Errors raised while assembling a [`Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "missing ALPHA_VANTAGE_API_KEY: set the environment variable or add \
         `ALPHA_VANTAGE_API_KEY=your_api_key` to a .env file"
    )]
    MissingApiKey,

    #[error("invalid base URL {url:?}: must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    #[error("invalid ALPHA_VANTAGE_TIMEOUT_SECS value {value:?}: expected a whole number of seconds")]
    InvalidTimeout { value: String },
}

/// Connection settings for the provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub user_agent: String,
    pub transport: TransportOptions,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("alphavantage-mcp/{}", env!("CARGO_PKG_VERSION")),
            transport: TransportOptions::default(),
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// A `.env` file in the working directory or any of its parents is loaded
    /// first; variables already set in the environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_key(None)
    }

    /// Like [`Config::from_env`], but an explicit key takes precedence over
    /// the environment.
    pub fn from_env_with_key(api_key: Option<String>) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("ignoring unreadable .env file: {}", e),
        }

        let api_key = api_key
            .or_else(|| env::var(API_KEY_VAR).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key.trim());

        if let Ok(url) = env::var(BASE_URL_VAR) {
            config = config.with_base_url(url)?;
        }

        if let Ok(value) = env::var(TIMEOUT_VAR) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: value.clone() })?;
            config.transport = config.transport.with_timeout(Duration::from_secs(secs));
        }

        if let Ok(proxy) = env::var(PROXY_VAR) {
            if !proxy.trim().is_empty() {
                config.transport = config.transport.with_proxy(proxy.trim());
            }
        }

        Ok(config)
    }

    /// Point the client at a different API host. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Full URL of the query endpoint.
    pub fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}
