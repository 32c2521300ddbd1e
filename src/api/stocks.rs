//! Quotes, symbol search and market status.

use serde::Deserialize;
use serde_with::serde_as;

use super::Lenient;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    pub quote: Option<GlobalQuote>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    #[serde_as(as = "Lenient")]
    pub symbol: Option<String>,
    #[serde(rename = "02. open")]
    #[serde_as(as = "Lenient")]
    pub open: Option<String>,
    #[serde(rename = "03. high")]
    #[serde_as(as = "Lenient")]
    pub high: Option<String>,
    #[serde(rename = "04. low")]
    #[serde_as(as = "Lenient")]
    pub low: Option<String>,
    #[serde(rename = "05. price")]
    #[serde_as(as = "Lenient")]
    pub price: Option<String>,
    #[serde(rename = "06. volume")]
    #[serde_as(as = "Lenient")]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    #[serde_as(as = "Lenient")]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    #[serde_as(as = "Lenient")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    #[serde_as(as = "Lenient")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    #[serde_as(as = "Lenient")]
    pub change_percent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbolSearchResponse {
    #[serde(rename = "bestMatches")]
    pub best_matches: Option<Vec<SymbolMatch>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    #[serde_as(as = "Lenient")]
    pub symbol: Option<String>,
    #[serde(rename = "2. name")]
    #[serde_as(as = "Lenient")]
    pub name: Option<String>,
    #[serde(rename = "3. type")]
    #[serde_as(as = "Lenient")]
    pub kind: Option<String>,
    #[serde(rename = "4. region")]
    #[serde_as(as = "Lenient")]
    pub region: Option<String>,
    #[serde(rename = "8. currency")]
    #[serde_as(as = "Lenient")]
    pub currency: Option<String>,
    #[serde(rename = "9. matchScore")]
    #[serde_as(as = "Lenient")]
    pub match_score: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketStatusResponse {
    pub endpoint: Option<String>,
    pub markets: Option<Vec<Market>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Market {
    pub market_type: Option<String>,
    #[serde_as(as = "Lenient")]
    pub region: Option<String>,
    #[serde_as(as = "Lenient")]
    pub primary_exchanges: Option<String>,
    #[serde_as(as = "Lenient")]
    pub local_open: Option<String>,
    #[serde_as(as = "Lenient")]
    pub local_close: Option<String>,
    #[serde_as(as = "Lenient")]
    pub current_status: Option<String>,
    #[serde_as(as = "Lenient")]
    pub notes: Option<String>,
}

/// Realtime bulk quotes. Non-premium keys receive a `message` instead of data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkQuotesResponse {
    pub endpoint: Option<String>,
    pub message: Option<String>,
    pub data: Option<Vec<BulkQuote>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BulkQuote {
    #[serde_as(as = "Lenient")]
    pub symbol: Option<String>,
    #[serde_as(as = "Lenient")]
    pub timestamp: Option<String>,
    #[serde_as(as = "Lenient")]
    pub open: Option<String>,
    #[serde_as(as = "Lenient")]
    pub high: Option<String>,
    #[serde_as(as = "Lenient")]
    pub low: Option<String>,
    #[serde_as(as = "Lenient")]
    pub close: Option<String>,
    #[serde_as(as = "Lenient")]
    pub volume: Option<String>,
    #[serde_as(as = "Lenient")]
    pub previous_close: Option<String>,
    #[serde_as(as = "Lenient")]
    pub change: Option<String>,
    #[serde_as(as = "Lenient")]
    pub change_percent: Option<String>,
    #[serde_as(as = "Lenient")]
    pub extended_hours_quote: Option<String>,
    #[serde_as(as = "Lenient")]
    pub extended_hours_change: Option<String>,
    #[serde_as(as = "Lenient")]
    pub extended_hours_change_percent: Option<String>,
}
