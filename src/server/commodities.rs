//! Commodity price series. Every tool shares one parameter shape and
//! differs only in the provider function it calls.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::AlphaVantageServer;
use crate::api::economy::{Commodity, MacroSeriesResponse, SeriesInterval};
use crate::format::economy::{self, MacroKind};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommodityParams {
    /// Time interval between data points (default: monthly)
    pub interval: Option<SeriesInterval>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

impl AlphaVantageServer {
    async fn commodity(
        &self,
        commodity: Commodity,
        p: CommodityParams,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new(commodity.as_str())
            .param("interval", p.interval.unwrap_or(SeriesInterval::Monthly));
        let limit = p.limit.unwrap_or(10);
        let failure = format!(
            "Error: Failed to fetch {}.",
            commodity.description().to_lowercase()
        );
        self.render_json(query, &failure, |resp: MacroSeriesResponse| {
            economy::macro_series(&resp, MacroKind::Commodity, limit)
        })
        .await
    }
}

#[tool_router(router = commodities_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(name = "get-wti", description = "Get West Texas Intermediate (WTI) crude oil prices")]
    pub async fn wti(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Wti, p).await
    }

    #[tool(name = "get-brent", description = "Get Brent (Europe) crude oil prices")]
    pub async fn brent(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Brent, p).await
    }

    #[tool(name = "get-natural-gas", description = "Get natural gas prices")]
    pub async fn natural_gas(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::NaturalGas, p).await
    }

    #[tool(name = "get-copper", description = "Get global copper prices")]
    pub async fn copper(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Copper, p).await
    }

    #[tool(name = "get-aluminum", description = "Get global aluminum prices")]
    pub async fn aluminum(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Aluminum, p).await
    }

    #[tool(name = "get-wheat", description = "Get global wheat prices")]
    pub async fn wheat(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Wheat, p).await
    }

    #[tool(name = "get-corn", description = "Get global corn prices")]
    pub async fn corn(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Corn, p).await
    }

    #[tool(name = "get-cotton", description = "Get global cotton prices")]
    pub async fn cotton(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Cotton, p).await
    }

    #[tool(name = "get-sugar", description = "Get global sugar prices")]
    pub async fn sugar(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Sugar, p).await
    }

    #[tool(name = "get-coffee", description = "Get global coffee prices")]
    pub async fn coffee(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::Coffee, p).await
    }

    #[tool(name = "get-global-commodities-index", description = "Get global price index of all commodities")]
    pub async fn global_commodities_index(
        &self,
        Parameters(p): Parameters<CommodityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.commodity(Commodity::AllCommodities, p).await
    }
}
