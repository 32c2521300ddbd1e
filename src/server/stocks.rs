//! Quotes, symbol search, market status and equity time series.

use chrono::Utc;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{text_result, AlphaVantageServer};
use crate::api::series::TimeSeriesResponse;
use crate::api::stocks::{
    BulkQuotesResponse, GlobalQuoteResponse, MarketStatusResponse, SymbolSearchResponse,
};
use crate::api::{DataType, IntradayInterval, OutputSize};
use crate::format::stocks::{self, Adjusted};
use crate::format::time;
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SymbolParams {
    /// The stock symbol to look up (e.g., IBM, AAPL, MSFT)
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The search keywords (e.g., Microsoft, Tesla, Banking)
    pub keywords: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BulkQuotesParams {
    /// Up to 100 ticker symbols separated by commas (e.g., MSFT,AAPL,IBM)
    pub symbols: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MonthlyAdjustedParams {
    /// The stock symbol to look up (e.g., IBM, AAPL, MSFT)
    pub symbol: String,
    /// Number of months to display (default: 12)
    pub months: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeeklyAdjustedParams {
    /// The stock symbol to look up (e.g., IBM, AAPL, MSFT)
    pub symbol: String,
    /// Number of weeks to display (default: 12)
    pub weeks: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DailyAdjustedParams {
    /// The stock symbol to look up (e.g., IBM, AAPL, MSFT)
    pub symbol: String,
    /// Data size to return: 'compact' = last 100 data points (default), 'full' = 20+ years of data
    pub outputsize: Option<OutputSize>,
    /// Number of days to display (default: 20)
    pub days: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IntradayParams {
    /// The stock symbol to look up (e.g., IBM, AAPL, MSFT)
    pub symbol: String,
    /// Time interval between data points
    pub interval: IntradayInterval,
    /// Whether to return adjusted data (default: true)
    pub adjusted: Option<bool>,
    /// Whether to include extended hours data (default: true)
    pub extended_hours: Option<bool>,
    /// Specific month in YYYY-MM format (e.g., 2009-01)
    pub month: Option<String>,
    /// Data size to return: 'compact' = last 100 data points (default), 'full' = trailing 30 days or full month
    pub outputsize: Option<OutputSize>,
    /// Number of data points to display (default: 20)
    pub datapoints: Option<usize>,
}

impl AlphaVantageServer {
    async fn adjusted(
        &self,
        kind: Adjusted,
        query: Query,
        limit: Option<usize>,
        failure: &str,
    ) -> Result<CallToolResult, McpError> {
        let limit = limit.unwrap_or(kind.default_limit());
        self.render_json(query, failure, |resp: TimeSeriesResponse| {
            stocks::adjusted_series(&resp, kind, limit)
        })
        .await
    }
}

#[tool_router(router = stocks_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-current-time",
        description = "Get the current date and time in UTC, Eastern Time (ET), and Pacific Time (PT)"
    )]
    pub async fn current_time(&self) -> Result<CallToolResult, McpError> {
        Ok(text_result(time::current_time(Utc::now())))
    }

    #[tool(
        name = "get-stock-quote",
        description = "Get the latest price and volume information for a ticker symbol"
    )]
    pub async fn stock_quote(
        &self,
        Parameters(p): Parameters<SymbolParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("GLOBAL_QUOTE")
            .param("symbol", &p.symbol)
            .param("datatype", DataType::Json);
        self.render_json(query, "Failed to retrieve quote data", |resp: GlobalQuoteResponse| {
            stocks::quote(&resp)
        })
        .await
    }

    #[tool(
        name = "search-ticker",
        description = "Search for stock symbols based on keywords"
    )]
    pub async fn search_ticker(
        &self,
        Parameters(p): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("SYMBOL_SEARCH")
            .param("keywords", &p.keywords)
            .param("datatype", DataType::Json);
        self.render_json(
            query,
            "Failed to retrieve search results",
            |resp: SymbolSearchResponse| stocks::search(&resp),
        )
        .await
    }

    #[tool(
        name = "get-market-status",
        description = "Get the current market status (open vs. closed) of major trading venues worldwide"
    )]
    pub async fn market_status(&self) -> Result<CallToolResult, McpError> {
        let query = Query::new("MARKET_STATUS").param("datatype", DataType::Json);
        self.render_json(
            query,
            "Failed to retrieve market status data",
            |resp: MarketStatusResponse| stocks::market_status(&resp),
        )
        .await
    }

    #[tool(
        name = "get-bulk-quotes",
        description = "Get realtime quotes for multiple US-traded symbols in bulk (up to 100 symbols)"
    )]
    pub async fn bulk_quotes(
        &self,
        Parameters(p): Parameters<BulkQuotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("REALTIME_BULK_QUOTES")
            .param("symbol", &p.symbols)
            .param("datatype", DataType::Json);
        self.render_json(
            query,
            "Failed to retrieve bulk quotes data",
            |resp: BulkQuotesResponse| stocks::bulk_quotes(&resp),
        )
        .await
    }

    #[tool(
        name = "get-monthly-adjusted",
        description = "Get monthly adjusted time series data (20+ years of historical data) for a stock symbol"
    )]
    pub async fn monthly_adjusted(
        &self,
        Parameters(p): Parameters<MonthlyAdjustedParams>,
    ) -> Result<CallToolResult, McpError> {
        let kind = Adjusted::Monthly;
        let query = Query::new(kind.function())
            .param("symbol", &p.symbol)
            .param("datatype", DataType::Json);
        self.adjusted(
            kind,
            query,
            p.months,
            "Failed to retrieve monthly adjusted time series data",
        )
        .await
    }

    #[tool(
        name = "get-weekly-adjusted",
        description = "Get weekly adjusted time series data (20+ years of historical data) for a stock symbol"
    )]
    pub async fn weekly_adjusted(
        &self,
        Parameters(p): Parameters<WeeklyAdjustedParams>,
    ) -> Result<CallToolResult, McpError> {
        let kind = Adjusted::Weekly;
        let query = Query::new(kind.function())
            .param("symbol", &p.symbol)
            .param("datatype", DataType::Json);
        self.adjusted(
            kind,
            query,
            p.weeks,
            "Failed to retrieve weekly adjusted time series data",
        )
        .await
    }

    #[tool(
        name = "get-daily-adjusted",
        description = "Get daily adjusted time series data with splits and dividend events for a stock symbol"
    )]
    pub async fn daily_adjusted(
        &self,
        Parameters(p): Parameters<DailyAdjustedParams>,
    ) -> Result<CallToolResult, McpError> {
        let kind = Adjusted::Daily;
        let query = Query::new(kind.function())
            .param("symbol", &p.symbol)
            .param("outputsize", p.outputsize.unwrap_or(OutputSize::Compact))
            .param("datatype", DataType::Json);
        self.adjusted(
            kind,
            query,
            p.days,
            "Failed to retrieve daily adjusted time series data",
        )
        .await
    }

    #[tool(
        name = "get-intraday",
        description = "Get intraday time series data (OHLCV) for a stock symbol"
    )]
    pub async fn intraday(
        &self,
        Parameters(p): Parameters<IntradayParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("TIME_SERIES_INTRADAY")
            .param("symbol", &p.symbol)
            .param("interval", p.interval)
            .param("datatype", DataType::Json)
            .opt("adjusted", p.adjusted)
            .opt("extended_hours", p.extended_hours)
            .opt_str("month", p.month.as_deref())
            .opt("outputsize", p.outputsize);
        let limit = p.datapoints.unwrap_or(20);
        self.render_json(
            query,
            "Failed to retrieve intraday time series data",
            |resp: TimeSeriesResponse| stocks::intraday(&resp, limit),
        )
        .await
    }
}
