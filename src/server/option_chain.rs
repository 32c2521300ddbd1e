//! Realtime and historical option chains.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::AlphaVantageServer;
use crate::api::option_chain::OptionChainResponse;
use crate::api::DataType;
use crate::format::option_chain::{self, Chain};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RealtimeOptionsParams {
    /// The name of the equity (e.g., IBM)
    pub symbol: String,
    /// Enable greeks & implied volatility fields (default: false)
    pub require_greeks: Option<bool>,
    /// Specific US options contract ID
    pub contract: Option<String>,
    /// Response format (default: json)
    pub datatype: Option<DataType>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HistoricalOptionsParams {
    /// The name of the equity (e.g., IBM)
    pub symbol: String,
    /// Specific date in YYYY-MM-DD format (default: previous trading session)
    pub date: Option<String>,
    /// Response format (default: json)
    pub datatype: Option<DataType>,
}

impl AlphaVantageServer {
    /// CSV chains are returned verbatim; JSON chains are rendered.
    async fn chain(
        &self,
        chain: Chain,
        query: Query,
        datatype: Option<DataType>,
        failure: &str,
    ) -> Result<CallToolResult, McpError> {
        match datatype {
            Some(DataType::Csv) => self.passthrough(query, failure).await,
            _ => {
                self.render_json(query, failure, |resp: OptionChainResponse| {
                    option_chain::options(&resp, chain)
                })
                .await
            }
        }
    }
}

#[tool_router(router = option_chain_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-realtime-options",
        description = "Get realtime US options data with full market coverage, sorted by expiration dates and strike prices."
    )]
    pub async fn realtime_options(
        &self,
        Parameters(p): Parameters<RealtimeOptionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("REALTIME_OPTIONS")
            .param("symbol", &p.symbol)
            .opt("require_greeks", p.require_greeks)
            .opt_str("contract", p.contract.as_deref())
            .opt("datatype", p.datatype);
        self.chain(
            Chain::Realtime,
            query,
            p.datatype,
            "Failed to fetch options data. Please try again later.",
        )
        .await
    }

    #[tool(
        name = "get-historical-options",
        description = "Get historical options data covering 15+ years of history with implied volatility and Greeks."
    )]
    pub async fn historical_options(
        &self,
        Parameters(p): Parameters<HistoricalOptionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("HISTORICAL_OPTIONS")
            .param("symbol", &p.symbol)
            .opt_str("date", p.date.as_deref())
            .opt("datatype", p.datatype);
        self.chain(
            Chain::Historical,
            query,
            p.datatype,
            "Failed to fetch historical options data. Please try again later.",
        )
        .await
    }
}
