//! MCP server exposing the Alpha Vantage API as tools.
//!
//! Tools are grouped by provider category, one `#[tool_router]` per module,
//! and combined into a single router in [`AlphaVantageServer::new`].

mod commodities;
mod crypto;
mod economic;
mod forex;
mod fundamental;
mod intelligence;
mod option_chain;
mod stocks;
mod technical;

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool_handler, ErrorData as McpError, ServerHandler};
use serde::de::DeserializeOwned;

use crate::client::{fetch_csv, fetch_json, AlphaVantageClient, Client, ClientError};
use crate::config::Config;
use crate::query::Query;
use crate::{SERVER_NAME, SERVER_VERSION};

pub use commodities::CommodityParams;
pub use crypto::{CryptoRateParams, DigitalCurrencyParams};
pub use economic::{EconomicParams, IndicatorIntervalParams, TreasuryYieldParams};
pub use forex::{ExchangeRateParams, FxSeriesParams};
pub use fundamental::{
    CompanyParams, DividendsParams, EarningsCalendarParams, EtfProfileParams, StatementParams,
};
pub use intelligence::{AnalyticsParams, InsiderParams, NewsParams, TranscriptParams};
pub use option_chain::{HistoricalOptionsParams, RealtimeOptionsParams};
pub use stocks::{
    BulkQuotesParams, DailyAdjustedParams, IntradayParams, MonthlyAdjustedParams, SearchParams,
    SymbolParams, WeeklyAdjustedParams,
};
pub use technical::{
    CycleParams, MomentumParams, MovingAverageParams, VolatilityParams, VolumeParams,
};

const INSTRUCTIONS: &str = "Alpha Vantage market data: quotes and time series, company \
     fundamentals, forex, crypto, commodities, economic indicators, technical indicators, \
     options chains and market intelligence. Every tool answers with plain text.";

/// MCP server backed by a market data [`Client`].
#[derive(Clone)]
pub struct AlphaVantageServer {
    client: Arc<dyn Client>,
    tool_router: ToolRouter<Self>,
}

impl AlphaVantageServer {
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self {
            client,
            tool_router: Self::stocks_router()
                + Self::fundamental_router()
                + Self::forex_router()
                + Self::crypto_router()
                + Self::commodities_router()
                + Self::economic_router()
                + Self::technical_router()
                + Self::option_chain_router()
                + Self::intelligence_router(),
        }
    }

    /// Server talking to the public API with the given settings.
    pub fn from_config(config: Config) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(AlphaVantageClient::new(config)?)))
    }

    /// Names of every registered tool, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Fetch a JSON endpoint and render it. Transport and decode failures
    /// become an error result carrying `failure`.
    pub(crate) async fn render_json<T, F>(
        &self,
        query: Query,
        failure: &str,
        render: F,
    ) -> Result<CallToolResult, McpError>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> String + Send,
    {
        match fetch_json::<T>(self.client.as_ref(), &query).await {
            Ok(reply) => Ok(text_result(reply.render(render))),
            Err(e) => Ok(upstream_failure(&query, failure, e)),
        }
    }

    /// CSV counterpart of [`Self::render_json`].
    pub(crate) async fn render_csv<T, F>(
        &self,
        query: Query,
        failure: &str,
        render: F,
    ) -> Result<CallToolResult, McpError>
    where
        T: DeserializeOwned,
        F: FnOnce(Vec<T>) -> String + Send,
    {
        match fetch_csv::<T>(self.client.as_ref(), &query).await {
            Ok(reply) => Ok(text_result(reply.render(render))),
            Err(e) => Ok(upstream_failure(&query, failure, e)),
        }
    }

    /// Return the provider body untouched.
    pub(crate) async fn passthrough(
        &self,
        query: Query,
        failure: &str,
    ) -> Result<CallToolResult, McpError> {
        match self.client.fetch(&query).await {
            Ok(body) => Ok(text_result(body)),
            Err(e) => Ok(upstream_failure(&query, failure, e)),
        }
    }
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

fn upstream_failure(query: &Query, failure: &str, error: ClientError) -> CallToolResult {
    tracing::warn!(function = query.function(), error = %error, "upstream request failed");
    CallToolResult::error(vec![Content::text(failure.to_string())])
}

pub(crate) fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[tool_handler]
impl ServerHandler for AlphaVantageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                title: Some("Alpha Vantage Market Data".to_string()),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
