//! News sentiment, transcripts, market movers, insider activity and
//! fixed-window analytics.

use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::serde_as;

use super::{wire_enum, Lenient};

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsResponse {
    /// Total matching articles; sent as a string.
    pub items: Option<Value>,
    #[serde_as(as = "Lenient")]
    pub sentiment_score_definition: Option<String>,
    #[serde_as(as = "Lenient")]
    pub relevance_score_definition: Option<String>,
    pub feed: Option<Vec<Article>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde_as(as = "Lenient")]
    pub title: Option<String>,
    #[serde_as(as = "Lenient")]
    pub url: Option<String>,
    #[serde_as(as = "Lenient")]
    pub time_published: Option<String>,
    pub authors: Vec<String>,
    #[serde_as(as = "Lenient")]
    pub summary: Option<String>,
    #[serde_as(as = "Lenient")]
    pub source: Option<String>,
    #[serde_as(as = "Lenient")]
    pub category_within_source: Option<String>,
    pub topics: Vec<TopicRelevance>,
    pub overall_sentiment_score: Option<Value>,
    #[serde_as(as = "Lenient")]
    pub overall_sentiment_label: Option<String>,
    pub ticker_sentiment: Vec<TickerSentiment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicRelevance {
    pub topic: Option<String>,
    pub relevance_score: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TickerSentiment {
    pub ticker: Option<String>,
    pub relevance_score: Option<Value>,
    pub ticker_sentiment_score: Option<Value>,
    pub ticker_sentiment_label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranscriptResponse {
    pub symbol: Option<String>,
    pub quarter: Option<String>,
    pub transcript: Option<Vec<TranscriptSegment>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranscriptSegment {
    pub speaker: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub sentiment: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarketMoversResponse {
    pub metadata: Option<String>,
    pub last_updated: Option<String>,
    pub top_gainers: Vec<TickerMove>,
    pub top_losers: Vec<TickerMove>,
    pub most_actively_traded: Vec<TickerMove>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TickerMove {
    #[serde_as(as = "Lenient")]
    pub ticker: Option<String>,
    #[serde_as(as = "Lenient")]
    pub price: Option<String>,
    #[serde_as(as = "Lenient")]
    pub change_amount: Option<String>,
    #[serde_as(as = "Lenient")]
    pub change_percentage: Option<String>,
    #[serde_as(as = "Lenient")]
    pub volume: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InsiderResponse {
    pub data: Option<Vec<InsiderTransaction>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InsiderTransaction {
    #[serde_as(as = "Lenient")]
    pub transaction_date: Option<String>,
    #[serde_as(as = "Lenient")]
    pub ticker: Option<String>,
    #[serde_as(as = "Lenient")]
    pub executive: Option<String>,
    #[serde_as(as = "Lenient")]
    pub executive_title: Option<String>,
    #[serde_as(as = "Lenient")]
    pub security_type: Option<String>,
    /// `"A"` for acquisitions, `"D"` for disposals.
    pub acquisition_or_disposal: Option<String>,
    #[serde_as(as = "Lenient")]
    pub shares: Option<String>,
    #[serde_as(as = "Lenient")]
    pub share_price: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsResponse {
    pub meta_data: Option<AnalyticsMeta>,
    pub payload: Option<AnalyticsPayload>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsMeta {
    #[serde_as(as = "Lenient")]
    pub symbols: Option<String>,
    #[serde_as(as = "Lenient")]
    pub min_dt: Option<String>,
    #[serde_as(as = "Lenient")]
    pub max_dt: Option<String>,
    #[serde_as(as = "Lenient")]
    pub ohlc: Option<String>,
    #[serde_as(as = "Lenient")]
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsPayload {
    /// Calculation name to result, in response order. Shapes differ per
    /// calculation: scalars per symbol, matrices, or histograms.
    #[serde(rename = "RETURNS_CALCULATIONS")]
    pub returns_calculations: Option<Map<String, Value>>,
}

wire_enum! {
    pub enum NewsSort {
        Latest => "LATEST",
        Earliest => "EARLIEST",
        Relevance => "RELEVANCE",
    }
}

wire_enum! {
    /// Sampling interval for fixed-window analytics.
    pub enum AnalyticsInterval {
        OneMin => "1min",
        FiveMin => "5min",
        FifteenMin => "15min",
        ThirtyMin => "30min",
        SixtyMin => "60min",
        Daily => "DAILY",
        Weekly => "WEEKLY",
        Monthly => "MONTHLY",
    }
}

wire_enum! {
    /// Price field analytics are computed over.
    pub enum Ohlc {
        Open => "open",
        High => "high",
        Low => "low",
        Close => "close",
    }
}

pub const NEWS_TOPICS: &[&str] = &[
    "blockchain",
    "earnings",
    "ipo",
    "mergers_and_acquisitions",
    "financial_markets",
    "economy_fiscal",
    "economy_monetary",
    "economy_macro",
    "energy_transportation",
    "finance",
    "life_sciences",
    "manufacturing",
    "real_estate",
    "retail_wholesale",
    "technology",
];

pub const ANALYTICS_CALCULATIONS: &[&str] = &[
    "MIN",
    "MAX",
    "MEAN",
    "MEDIAN",
    "CUMULATIVE_RETURN",
    "VARIANCE",
    "STDDEV",
    "MAX_DRAWDOWN",
    "HISTOGRAM",
    "AUTOCORRELATION",
    "COVARIANCE",
    "CORRELATION",
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn calculations_keep_response_order() {
        let resp: AnalyticsResponse = serde_json::from_value(json!({
            "meta_data": { "symbols": "AAPL,IBM" },
            "payload": { "RETURNS_CALCULATIONS": {
                "MIN": { "AAPL": -0.01 },
                "CORRELATION": { "index": ["AAPL", "IBM"], "correlation": [[1.0], [0.5, 1.0]] },
                "MAX": { "AAPL": 0.02 }
            }}
        }))
        .unwrap();

        let calcs = resp.payload.unwrap().returns_calculations.unwrap();
        let names: Vec<&String> = calcs.keys().collect();
        assert_eq!(names, ["MIN", "CORRELATION", "MAX"]);
    }

    #[test]
    fn news_sentiment_score_is_numeric() {
        let resp: NewsResponse = serde_json::from_value(json!({
            "items": "1",
            "feed": [{ "title": "t", "overall_sentiment_score": 0.25, "authors": ["A"] }]
        }))
        .unwrap();
        let article = &resp.feed.unwrap()[0];
        assert_eq!(article.overall_sentiment_score, Some(json!(0.25)));
        assert!(article.topics.is_empty());
    }
}
