//! Transport configuration for the upstream HTTP connection.

use std::collections::HashMap;
use std::time::Duration;

/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Controls how requests are sent to the market data provider.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Request timeout. `None` disables the client-side timeout.
    pub timeout: Option<Duration>,
    /// HTTP(S) proxy URL applied to every request.
    pub proxy: Option<String>,
    /// Additional HTTP headers to send with every request.
    pub headers: HashMap<String, String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            proxy: None,
            headers: HashMap::new(),
        }
    }
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy = Some(proxy_url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}
