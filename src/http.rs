//! HTTP utilities for talking to the Alpha Vantage API.

use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};

use crate::client::ClientError;
use crate::options::TransportOptions;
use crate::query::Query;

/// Build a configured HTTP client from transport options.
pub fn build_http_client(
    transport_options: &TransportOptions,
    user_agent: &str,
) -> Result<Client, ClientError> {
    let mut builder = Client::builder().user_agent(user_agent.to_string());

    if let Some(t) = transport_options.timeout {
        builder = builder.timeout(t);
    }
    if let Some(proxy_url) = &transport_options.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ClientError::Config(format!("invalid proxy {proxy_url:?}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Add extra headers to a request if specified in transport options.
pub fn add_extra_headers(
    mut request: RequestBuilder,
    transport_options: &TransportOptions,
) -> RequestBuilder {
    for (key, value) in &transport_options.headers {
        // The configured user agent is set on the client itself.
        if key.eq_ignore_ascii_case(USER_AGENT.as_str()) {
            continue;
        }
        request = request.header(key, value);
    }
    request
}

/// Extension trait for RequestBuilder that attaches and logs query parameters.
pub trait RequestBuilderExt {
    /// Attach the query followed by the API key. Only the query is logged.
    fn query_logged(self, query: &Query, api_key: &str) -> Self;
}

impl RequestBuilderExt for RequestBuilder {
    fn query_logged(self, query: &Query, api_key: &str) -> Self {
        tracing::debug!(function = query.function(), "API request: {}", query);

        self.query(query.pairs()).query(&[("apikey", api_key)])
    }
}

/// Extension trait for Response that logs response body.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let text = self.text().await?;
        tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_appended_last_and_kept_out_of_the_query() {
        let query = Query::new("GLOBAL_QUOTE").param("symbol", "IBM");
        let request = Client::new()
            .get("https://x.test/query")
            .query_logged(&query, "SECRET")
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://x.test/query?function=GLOBAL_QUOTE&symbol=IBM&apikey=SECRET"
        );
        assert!(request.url().as_str().ends_with("&apikey=SECRET"));
        assert!(!format!("{query}").contains("SECRET"));
        assert_eq!(query.get("apikey"), None);
    }

    #[test]
    fn extra_headers_skip_user_agent() {
        let options = TransportOptions::new()
            .with_header("X-Trace", "1")
            .with_header("User-Agent", "override");
        let request = add_extra_headers(Client::new().get("https://x.test/query"), &options)
            .build()
            .unwrap();

        assert_eq!(request.headers()["x-trace"], "1");
        assert!(request.headers().get(USER_AGENT).is_none());
    }
}
