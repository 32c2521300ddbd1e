//! US economic indicators. Indicators differ in which of `interval` and
//! `maturity` they accept, so there are three parameter shapes.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::AlphaVantageServer;
use crate::api::economy::{EconomicIndicator, EconomicInterval, MacroSeriesResponse, Maturity};
use crate::format::economy::{self, MacroKind};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EconomicParams {
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IndicatorIntervalParams {
    /// Time interval between data points (default depends on the indicator)
    pub interval: Option<EconomicInterval>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TreasuryYieldParams {
    /// Time interval between data points (default depends on the indicator)
    pub interval: Option<EconomicInterval>,
    /// Treasury maturity (default: 10year)
    pub maturity: Option<Maturity>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

impl From<EconomicParams> for TreasuryYieldParams {
    fn from(p: EconomicParams) -> Self {
        Self {
            interval: None,
            maturity: None,
            limit: p.limit,
        }
    }
}

impl From<IndicatorIntervalParams> for TreasuryYieldParams {
    fn from(p: IndicatorIntervalParams) -> Self {
        Self {
            interval: p.interval,
            maturity: None,
            limit: p.limit,
        }
    }
}

impl AlphaVantageServer {
    /// Only inputs the indicator accepts are forwarded; the provider picks
    /// its own defaults for the rest.
    async fn indicator(
        &self,
        indicator: EconomicIndicator,
        p: impl Into<TreasuryYieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = p.into();
        let interval = p.interval.filter(|_| indicator.accepts_interval());
        let maturity = p.maturity.filter(|_| indicator.accepts_maturity());
        let query = Query::new(indicator.as_str())
            .opt("interval", interval)
            .opt("maturity", maturity);
        let limit = p.limit.unwrap_or(10);
        let failure = format!(
            "Error: Failed to fetch {}.",
            indicator.description().to_lowercase()
        );
        self.render_json(query, &failure, |resp: MacroSeriesResponse| {
            economy::macro_series(&resp, MacroKind::Economic, limit)
        })
        .await
    }
}

#[tool_router(router = economic_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(name = "get-real-gdp", description = "Get real gross domestic product (GDP) of the United States")]
    pub async fn real_gdp(
        &self,
        Parameters(p): Parameters<IndicatorIntervalParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::RealGdp, p).await
    }

    #[tool(name = "get-real-gdp-per-capita", description = "Get real GDP per capita of the United States")]
    pub async fn real_gdp_per_capita(
        &self,
        Parameters(p): Parameters<EconomicParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::RealGdpPerCapita, p).await
    }

    #[tool(name = "get-treasury-yield", description = "Get U.S. treasury yield of a given maturity")]
    pub async fn treasury_yield(
        &self,
        Parameters(p): Parameters<TreasuryYieldParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::TreasuryYield, p).await
    }

    #[tool(name = "get-federal-funds-rate", description = "Get federal funds rate in the United States")]
    pub async fn federal_funds_rate(
        &self,
        Parameters(p): Parameters<IndicatorIntervalParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::FederalFundsRate, p).await
    }

    #[tool(name = "get-cpi", description = "Get consumer price index (CPI) of the United States")]
    pub async fn cpi(
        &self,
        Parameters(p): Parameters<IndicatorIntervalParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::Cpi, p).await
    }

    #[tool(name = "get-inflation", description = "Get annual inflation rates (consumer prices) of the United States")]
    pub async fn inflation(
        &self,
        Parameters(p): Parameters<EconomicParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::Inflation, p).await
    }

    #[tool(name = "get-retail-sales", description = "Get advance estimates of U.S. retail and food services sales")]
    pub async fn retail_sales(
        &self,
        Parameters(p): Parameters<EconomicParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::RetailSales, p).await
    }

    #[tool(name = "get-durable-goods-orders", description = "Get U.S. manufacturers' new orders of durable goods")]
    pub async fn durable_goods_orders(
        &self,
        Parameters(p): Parameters<EconomicParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::Durables, p).await
    }

    #[tool(name = "get-unemployment-rate", description = "Get monthly unemployment data of the United States")]
    pub async fn unemployment_rate(
        &self,
        Parameters(p): Parameters<EconomicParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::Unemployment, p).await
    }

    #[tool(name = "get-nonfarm-payroll", description = "Get monthly US All Employees: Total Nonfarm (Nonfarm Payroll)")]
    pub async fn nonfarm_payroll(
        &self,
        Parameters(p): Parameters<EconomicParams>,
    ) -> Result<CallToolResult, McpError> {
        self.indicator(EconomicIndicator::NonfarmPayroll, p).await
    }
}
