//! News sentiment, transcripts, market movers, insider activity and
//! fixed-window analytics.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{tool, tool_router, ErrorData as McpError};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{invalid_params, AlphaVantageServer};
use crate::api::intelligence::{
    AnalyticsInterval, AnalyticsResponse, InsiderResponse, MarketMoversResponse, NewsResponse,
    NewsSort, Ohlc, TranscriptResponse,
};
use crate::format::intelligence;
use crate::query::Query;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NewsParams {
    /// Stock/crypto/forex symbols to filter articles by (e.g., 'IBM' or 'COIN,CRYPTO:BTC,FOREX:USD')
    pub tickers: Option<String>,
    /// News topics to filter by (e.g., 'technology' or 'technology,ipo'). Supported topics: blockchain, earnings, ipo, mergers_and_acquisitions, financial_markets, economy_fiscal, economy_monetary, economy_macro, energy_transportation, finance, life_sciences, manufacturing, real_estate, retail_wholesale, technology
    pub topics: Option<String>,
    /// Start time in YYYYMMDDTHHMM format (e.g., '20220410T0130')
    pub time_from: Option<String>,
    /// End time in YYYYMMDDTHHMM format
    pub time_to: Option<String>,
    /// Sort order for results (default: LATEST)
    pub sort: Option<NewsSort>,
    /// Maximum number of results to return (default: 50, max: 1000)
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TranscriptParams {
    /// The symbol of the company (e.g., IBM)
    pub symbol: String,
    /// Fiscal quarter in YYYYQM format (e.g., 2024Q1)
    pub quarter: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InsiderParams {
    /// The symbol of the company (e.g., IBM)
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyticsParams {
    /// Comma-separated list of symbols (e.g., 'IBM,AAPL,MSFT')
    pub symbols: String,
    /// Date range(s) for the series. Use one value for start date or two values for start and end dates
    pub range: Vec<String>,
    /// Time interval between data points (e.g., 'DAILY', '1min')
    pub interval: AnalyticsInterval,
    /// Comma-separated list of analytics metrics to calculate. Supported: MIN, MAX, MEAN, MEDIAN, CUMULATIVE_RETURN, VARIANCE, STDDEV, MAX_DRAWDOWN, HISTOGRAM, AUTOCORRELATION, COVARIANCE, CORRELATION
    pub calculations: String,
    /// Price data to use for calculations (default: close)
    pub ohlc: Option<Ohlc>,
}

/// Map one or two range bounds onto `range` and `range2`.
fn with_range(query: Query, range: &[String]) -> Result<Query, McpError> {
    match range {
        [start] => Ok(query.param("range", start)),
        [start, end] => Ok(query.param("range", start).param("range2", end)),
        _ => Err(invalid_params(format!(
            "range takes one or two values, got {}",
            range.len()
        ))),
    }
}

#[tool_router(router = intelligence_router, vis = "pub(crate)")]
impl AlphaVantageServer {
    #[tool(
        name = "get-market-news-sentiment",
        description = "Get market news and sentiment data from premier news outlets covering stocks, cryptocurrencies, forex, and various financial topics."
    )]
    pub async fn market_news_sentiment(
        &self,
        Parameters(p): Parameters<NewsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("NEWS_SENTIMENT")
            .opt_str("tickers", p.tickers.as_deref())
            .opt_str("topics", p.topics.as_deref())
            .opt_str("time_from", p.time_from.as_deref())
            .opt_str("time_to", p.time_to.as_deref())
            .opt("sort", p.sort)
            .opt("limit", p.limit);
        self.render_json(
            query,
            "Failed to fetch market news and sentiment data. Please try again later.",
            |resp: NewsResponse| intelligence::news(&resp),
        )
        .await
    }

    #[tool(
        name = "get-earnings-call-transcript",
        description = "Get earnings call transcripts with LLM-based sentiment signals, covering over 15 years of history."
    )]
    pub async fn earnings_call_transcript(
        &self,
        Parameters(p): Parameters<TranscriptParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("EARNINGS_CALL_TRANSCRIPT")
            .param("symbol", &p.symbol)
            .param("quarter", &p.quarter);
        self.render_json(
            query,
            "Failed to fetch earnings call transcript data. Please try again later.",
            |resp: TranscriptResponse| intelligence::transcript(&resp),
        )
        .await
    }

    #[tool(
        name = "get-top-gainers-losers",
        description = "Get the top 20 gainers, losers, and most actively traded US market tickers."
    )]
    pub async fn top_gainers_losers(&self) -> Result<CallToolResult, McpError> {
        self.render_json(
            Query::new("TOP_GAINERS_LOSERS"),
            "Failed to fetch top gainers, losers, and active tickers data. Please try again later.",
            |resp: MarketMoversResponse| intelligence::market_movers(&resp),
        )
        .await
    }

    #[tool(
        name = "get-insider-transactions",
        description = "Get latest and historical insider transactions made by key stakeholders of a specific company."
    )]
    pub async fn insider_transactions(
        &self,
        Parameters(p): Parameters<InsiderParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("INSIDER_TRANSACTIONS").param("symbol", &p.symbol);
        self.render_json(
            query,
            "Failed to fetch insider transactions data. Please try again later.",
            |resp: InsiderResponse| intelligence::insider_transactions(&resp),
        )
        .await
    }

    #[tool(
        name = "get-advanced-analytics",
        description = "Get a rich set of advanced analytics metrics for time series over a fixed window."
    )]
    pub async fn advanced_analytics(
        &self,
        Parameters(p): Parameters<AnalyticsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = Query::new("ANALYTICS_FIXED_WINDOW")
            .param("symbols", &p.symbols)
            .param("interval", p.interval);
        let query = with_range(query, &p.range)?
            .opt_str("calculations", Some(p.calculations.as_str()))
            .opt("ohlc", p.ohlc);
        self.render_json(
            query,
            "Failed to fetch advanced analytics data. Please try again later.",
            |resp: AnalyticsResponse| intelligence::analytics(&resp),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_range_value_sets_only_the_start() {
        let query = with_range(Query::new("ANALYTICS_FIXED_WINDOW"), &["2023-07-01".into()])
            .unwrap();
        assert_eq!(query.get("range"), Some("2023-07-01"));
        assert_eq!(query.get("range2"), None);
    }

    #[test]
    fn two_range_values_set_start_and_end() {
        let range = vec!["2023-07-01".to_string(), "2023-08-31".to_string()];
        let query = with_range(Query::new("ANALYTICS_FIXED_WINDOW"), &range).unwrap();
        assert_eq!(query.get("range"), Some("2023-07-01"));
        assert_eq!(query.get("range2"), Some("2023-08-31"));
    }

    #[test]
    fn empty_or_long_ranges_are_rejected() {
        assert!(with_range(Query::new("X"), &[]).is_err());
        let three = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(with_range(Query::new("X"), &three).is_err());
    }
}
