//! Digital currency rates and series.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{invalid_params, AlphaVantageServer};
use crate::api::crypto::{CryptoSeries, CryptoSeriesResponse};
use crate::api::series::ExchangeRateResponse;
use crate::api::{IntradayInterval, OutputSize};
use crate::format::crypto;
use crate::format::forex::{self, RateKind};
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CryptoRateParams {
    /// The source currency (e.g., BTC)
    pub from_currency: String,
    /// The target currency (e.g., USD)
    pub to_currency: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DigitalCurrencyParams {
    /// The type of time series data to retrieve
    pub series_type: CryptoSeries,
    /// The cryptocurrency symbol (e.g., BTC)
    pub symbol: String,
    /// The exchange market (e.g., USD)
    pub market: String,
    /// Time interval between data points (required for intraday series)
    pub interval: Option<IntradayInterval>,
    /// Data size for intraday: 'compact' (last 100 data points) or 'full' (trailing 30 days)
    pub outputsize: Option<OutputSize>,
    /// Number of data points to display (default: 10)
    pub limit: Option<usize>,
}

#[tool_router(router = crypto_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-crypto-exchange-rate",
        description = "Get realtime exchange rate for any pair of digital or physical currencies"
    )]
    pub async fn crypto_exchange_rate(
        &self,
        Parameters(p): Parameters<CryptoRateParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("CURRENCY_EXCHANGE_RATE")
            .param("from_currency", &p.from_currency)
            .param("to_currency", &p.to_currency);
        self.render_json(
            query,
            "Error: Failed to fetch crypto exchange rate data.",
            |resp: ExchangeRateResponse| forex::exchange_rate(&resp, RateKind::Crypto),
        )
        .await
    }

    #[tool(
        name = "get-digital-currency",
        description = "Get time series data for a digital currency with various intervals"
    )]
    pub async fn digital_currency(
        &self,
        Parameters(p): Parameters<DigitalCurrencyParams>,
    ) -> Result<CallToolResult, McpError> {
        let series = p.series_type;
        let mut query = Query::new(series.function())
            .param("symbol", &p.symbol)
            .param("market", &p.market);

        if series == CryptoSeries::Intraday {
            let interval = p
                .interval
                .ok_or_else(|| invalid_params("interval parameter is required for intraday data"))?;
            query = query
                .param("interval", interval)
                .param("outputsize", p.outputsize.unwrap_or(OutputSize::Compact));
        }

        let limit = p.limit.unwrap_or(10);
        let failure = format!("Error: Failed to fetch {} cryptocurrency data.", series);
        self.render_json(query, &failure, |resp: CryptoSeriesResponse| {
            crypto::digital_currency(&resp, series, limit)
        })
        .await
    }
}
