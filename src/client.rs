//! Core client trait, error types and the reqwest-backed implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::api::Notice;
use crate::config::Config;
use crate::http::{add_extra_headers, build_http_client, RequestBuilderExt, ResponseExt};
use crate::query::Query;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Transport seam between tools and the market data provider.
#[async_trait]
pub trait Client: Send + Sync {
    /// Perform one `GET /query` call and return the raw response body.
    async fn fetch(&self, query: &Query) -> Result<String, ClientError>;
}

/// Client for the public Alpha Vantage REST API.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    config: Config,
    http: reqwest::Client,
}

impl AlphaVantageClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = build_http_client(&config.transport, &config.user_agent)?;
        Ok(Self { config, http })
    }

    /// Handle error responses. A provider notice in the body replaces the
    /// raw text.
    fn handle_error_response(status: reqwest::StatusCode, body: &str) -> ClientError {
        let body = serde_json::from_str::<Notice>(body)
            .ok()
            .and_then(|n| n.message())
            .unwrap_or_else(|| body.to_string());
        ClientError::Status { status, body }
    }
}

#[async_trait]
impl Client for AlphaVantageClient {
    async fn fetch(&self, query: &Query) -> Result<String, ClientError> {
        let url = self.config.query_url();

        let mut req = self
            .http
            .get(&url)
            .query_logged(query, &self.config.api_key);

        req = add_extra_headers(req, &self.config.transport);

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            return Err(Self::handle_error_response(status, &body));
        }

        Ok(response.text_logged().await?)
    }
}

/// A decoded provider response.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The provider answered with an informational or rate-limit message
    /// instead of data. Already rendered for display.
    Notice(String),
    Data(T),
}

impl<T> Reply<T> {
    /// Render the payload, passing notices through untouched.
    pub fn render(self, f: impl FnOnce(T) -> String) -> String {
        match self {
            Reply::Notice(text) => text,
            Reply::Data(data) => f(data),
        }
    }
}

/// Fetch a JSON endpoint and decode it into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &dyn Client,
    query: &Query,
) -> Result<Reply<T>, ClientError> {
    let body = client.fetch(query).await?;
    decode_json(&body)
}

/// Decode a JSON body, checking for provider notices first.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<Reply<T>, ClientError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if let Some(message) = Notice::deserialize(&value).ok().and_then(|n| n.message()) {
        return Ok(Reply::Notice(message));
    }

    Ok(Reply::Data(T::deserialize(value)?))
}

/// Fetch a CSV endpoint and decode every row into `T`.
///
/// Rate-limit and error messages arrive as JSON even on CSV endpoints.
pub async fn fetch_csv<T: DeserializeOwned>(
    client: &dyn Client,
    query: &Query,
) -> Result<Reply<Vec<T>>, ClientError> {
    let body = client.fetch(query).await?;
    decode_csv(&body)
}

pub fn decode_csv<T: DeserializeOwned>(body: &str) -> Result<Reply<Vec<T>>, ClientError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        let notice: Notice = serde_json::from_str(trimmed)?;
        return Ok(match notice.message() {
            Some(message) => Reply::Notice(message),
            None => Reply::Data(Vec::new()),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(trimmed.as_bytes());

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;

    Ok(Reply::Data(rows))
}
