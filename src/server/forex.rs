//! Currency exchange rates and FX series.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::AlphaVantageServer;
use crate::api::series::{ExchangeRateResponse, FxSeries, TimeSeriesResponse};
use crate::api::OutputSize;
use crate::format::forex::{self, RateKind};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExchangeRateParams {
    /// The source currency (e.g., USD, BTC)
    pub from_currency: String,
    /// The target currency (e.g., JPY, EUR)
    pub to_currency: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FxSeriesParams {
    /// The type of time series data to retrieve
    pub series_type: FxSeries,
    /// The source currency (e.g., EUR)
    pub from_symbol: String,
    /// The target currency (e.g., USD)
    pub to_symbol: String,
    /// Data size: 'compact' (last 100 data points) or 'full' (full-length time series) - only applies to daily series
    pub outputsize: Option<OutputSize>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[tool_router(router = forex_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-exchange-rate",
        description = "Get realtime exchange rate for any pair of digital or physical currencies"
    )]
    pub async fn exchange_rate(
        &self,
        Parameters(p): Parameters<ExchangeRateParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("CURRENCY_EXCHANGE_RATE")
            .param("from_currency", &p.from_currency)
            .param("to_currency", &p.to_currency);
        self.render_json(
            query,
            "Error: Failed to fetch exchange rate data.",
            |resp: ExchangeRateResponse| forex::exchange_rate(&resp, RateKind::Currency),
        )
        .await
    }

    #[tool(
        name = "get-fx-series",
        description = "Get time series data of a forex currency pair"
    )]
    pub async fn fx_series(
        &self,
        Parameters(p): Parameters<FxSeriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let series = p.series_type;
        let mut query = Query::new(series.function())
            .param("from_symbol", &p.from_symbol)
            .param("to_symbol", &p.to_symbol);
        // Only the daily series is paged.
        if series == FxSeries::Daily {
            query = query.param("outputsize", p.outputsize.unwrap_or(OutputSize::Compact));
        }

        let limit = p.limit.unwrap_or(10);
        let failure = format!("Error: Failed to fetch {} FX data.", series);
        self.render_json(query, &failure, |resp: TimeSeriesResponse| {
            forex::fx_series(&resp, series, limit)
        })
        .await
    }
}
