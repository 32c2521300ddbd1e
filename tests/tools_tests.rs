use alphavantage_mcp::api::crypto::CryptoSeries;
use alphavantage_mcp::api::economy::{Commodity, EconomicIndicator, Maturity};
use alphavantage_mcp::api::fundamental::EarningsHorizon;
use alphavantage_mcp::api::intelligence::{
    AnalyticsInterval, NewsSort, ANALYTICS_CALCULATIONS, NEWS_TOPICS,
};
use alphavantage_mcp::api::series::FxSeries;
use alphavantage_mcp::api::technical::{IndicatorInterval, MovingAverage, SeriesType};
use alphavantage_mcp::api::{DataType, OutputSize};
use alphavantage_mcp::rmcp::handler::server::wrapper::Parameters;
use alphavantage_mcp::rmcp::model::CallToolResult;
use alphavantage_mcp::server::{
    AnalyticsParams, DigitalCurrencyParams, DividendsParams, EarningsCalendarParams,
    EconomicParams, ExchangeRateParams, FxSeriesParams, MovingAverageParams, NewsParams,
    RealtimeOptionsParams, SymbolParams, TreasuryYieldParams,
};
use alphavantage_mcp::{AlphaVantageServer, Client, ClientError, Query};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct MockClient {
    bodies: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<Query>>>,
}

impl MockClient {
    fn new(bodies: Vec<&str>) -> Self {
        Self {
            bodies: Arc::new(Mutex::new(bodies.into_iter().map(String::from).collect())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client for MockClient {
    async fn fetch(&self, query: &Query) -> Result<String, ClientError> {
        self.queries.lock().unwrap().push(query.clone());
        let mut bodies = self.bodies.lock().unwrap();
        if !bodies.is_empty() {
            Ok(bodies.remove(0))
        } else {
            Err(ClientError::Config("No more mock responses".to_string()))
        }
    }
}

fn server(bodies: Vec<&str>) -> (AlphaVantageServer, MockClient) {
    let client = MockClient::new(bodies);
    (AlphaVantageServer::new(Arc::new(client.clone())), client)
}

fn text(result: &CallToolResult) -> String {
    let value = serde_json::to_value(result).unwrap();
    value["content"][0]["text"].as_str().unwrap().to_string()
}

fn failed(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

#[test]
fn every_category_is_registered() {
    let (server, _) = server(vec![]);
    let names = server.tool_names();

    assert_eq!(names.len(), 56);
    for name in [
        "get-current-time",
        "get-stock-quote",
        "get-company-overview",
        "get-exchange-rate",
        "get-digital-currency",
        "get-wti",
        "get-global-commodities-index",
        "get-treasury-yield",
        "get-moving-average",
        "get-realtime-options",
        "get-advanced-analytics",
    ] {
        assert!(names.iter().any(|n| n == name), "missing tool {}", name);
    }
}

#[test]
fn macro_tools_match_their_enums() {
    let (server, _) = server(vec![]);
    let names = server.tool_names();

    let expected = Commodity::ALL
        .iter()
        .map(|c| c.tool_name())
        .chain(EconomicIndicator::ALL.iter().map(|i| i.tool_name()));
    for name in expected {
        assert!(names.iter().any(|n| n == name), "missing tool {}", name);
    }
}

#[test]
fn schemas_list_supported_topics_and_calculations() {
    let news = serde_json::to_string(&schemars::schema_for!(NewsParams)).unwrap();
    for topic in NEWS_TOPICS {
        assert!(news.contains(topic), "topic {} not described", topic);
    }

    let analytics = serde_json::to_string(&schemars::schema_for!(AnalyticsParams)).unwrap();
    for calculation in ANALYTICS_CALCULATIONS {
        assert!(analytics.contains(calculation), "{} not described", calculation);
    }
}

#[tokio::test]
async fn stock_quote_renders_global_quote() {
    let body = r#"{"Global Quote": {
        "01. symbol": "IBM", "02. open": "185.00", "03. high": "188.20",
        "04. low": "184.90", "05. price": "187.50", "06. volume": "4123456",
        "07. latest trading day": "2024-03-15", "08. previous close": "186.00",
        "09. change": "1.50", "10. change percent": "0.8065%"
    }}"#;
    let (server, client) = server(vec![body]);

    let result = server
        .stock_quote(Parameters(SymbolParams {
            symbol: "IBM".to_string(),
        }))
        .await
        .unwrap();

    assert!(!failed(&result));
    let out = text(&result);
    assert!(out.starts_with("Symbol: IBM\nPrice: 187.50\n"));
    assert!(out.ends_with("Change: 1.50 (0.8065%)"));

    let queries = client.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].function(), "GLOBAL_QUOTE");
    assert_eq!(queries[0].get("symbol"), Some("IBM"));
}

#[tokio::test]
async fn numeric_quote_fields_still_render() {
    let body = r#"{"Global Quote": {"01. symbol": "IBM", "05. price": 187.5, "06. volume": 12345}}"#;
    let (server, _) = server(vec![body]);

    let result = server
        .stock_quote(Parameters(SymbolParams {
            symbol: "IBM".to_string(),
        }))
        .await
        .unwrap();

    assert!(!failed(&result));
    let out = text(&result);
    assert!(out.contains("Price: 187.5\n"));
    assert!(out.contains("Volume: 12345\n"));
    assert!(out.contains("Open: Unknown\n"));
}

#[tokio::test]
async fn rate_limit_notice_is_passed_through() {
    let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;
    let (server, _) = server(vec![body]);

    let result = server
        .stock_quote(Parameters(SymbolParams {
            symbol: "IBM".to_string(),
        }))
        .await
        .unwrap();

    assert!(!failed(&result));
    assert!(text(&result).starts_with("Note: Thank you for using Alpha Vantage!"));
}

#[tokio::test]
async fn transport_failure_becomes_error_result() {
    let (server, _) = server(vec![]);

    let result = server
        .stock_quote(Parameters(SymbolParams {
            symbol: "IBM".to_string(),
        }))
        .await
        .unwrap();

    assert!(failed(&result));
    assert_eq!(text(&result), "Failed to retrieve quote data");
}

#[tokio::test]
async fn moving_average_forwards_inputs_but_not_limit() {
    let body = r#"{
        "Meta Data": {
            "1: Symbol": "IBM",
            "2: Indicator": "Simple Moving Average (SMA)",
            "3: Last Refreshed": "2024-01-03",
            "4: Interval": "daily",
            "5: Time Period": 20,
            "6: Series Type": "close"
        },
        "Technical Analysis: SMA": {
            "2024-01-02": {"SMA": "150.0000"},
            "2024-01-03": {"SMA": "151.2500"}
        }
    }"#;
    let (server, client) = server(vec![body]);

    let result = server
        .moving_average(Parameters(MovingAverageParams {
            ma_type: MovingAverage::Sma,
            symbol: "IBM".to_string(),
            interval: IndicatorInterval::Daily,
            time_period: Some(20),
            series_type: Some(SeriesType::Close),
            fastlimit: None,
            slowlimit: None,
            limit: Some(1),
        }))
        .await
        .unwrap();

    let out = text(&result);
    assert!(out.starts_with("== Simple Moving Average (SMA) (IBM) =="));
    assert!(out.contains("2024-01-03: SMA = 151.2500"));
    assert!(!out.contains("2024-01-02: SMA"));
    assert!(out.ends_with("... and 1 more data points (showing latest 1 only)"));

    let query = &client.queries()[0];
    assert_eq!(query.function(), "SMA");
    assert_eq!(query.get("interval"), Some("daily"));
    assert_eq!(query.get("time_period"), Some("20"));
    assert_eq!(query.get("series_type"), Some("close"));
    assert_eq!(query.get("limit"), None);
    assert_eq!(query.get("fastlimit"), None);
}

#[tokio::test]
async fn crypto_intraday_requires_interval() {
    let (server, client) = server(vec![]);

    let err = server
        .digital_currency(Parameters(DigitalCurrencyParams {
            series_type: CryptoSeries::Intraday,
            symbol: "BTC".to_string(),
            market: "USD".to_string(),
            interval: None,
            outputsize: None,
            limit: None,
        }))
        .await
        .unwrap_err();

    assert!(err.message.contains("interval"));
    assert!(client.queries().is_empty());
}

#[tokio::test]
async fn analytics_rejects_three_range_values() {
    let (server, client) = server(vec![]);

    let result = server
        .advanced_analytics(Parameters(AnalyticsParams {
            symbols: "IBM,AAPL".to_string(),
            range: vec!["2023-01-01".into(), "2023-06-01".into(), "2023-12-31".into()],
            interval: AnalyticsInterval::Daily,
            calculations: "MEAN".to_string(),
            ohlc: None,
        }))
        .await;

    assert!(result.is_err());
    assert!(client.queries().is_empty());
}

#[tokio::test]
async fn csv_options_are_returned_verbatim() {
    let body = "contractID,symbol,expiration\nIBM240419C00100000,IBM,2024-04-19\n";
    let (server, client) = server(vec![body]);

    let result = server
        .realtime_options(Parameters(RealtimeOptionsParams {
            symbol: "IBM".to_string(),
            require_greeks: Some(true),
            contract: None,
            datatype: Some(DataType::Csv),
        }))
        .await
        .unwrap();

    assert_eq!(text(&result), body);
    let query = &client.queries()[0];
    assert_eq!(query.function(), "REALTIME_OPTIONS");
    assert_eq!(query.get("require_greeks"), Some("true"));
    assert_eq!(query.get("datatype"), Some("csv"));
}

#[tokio::test]
async fn treasury_yield_forwards_maturity() {
    let body = r#"{"name": "10-Year Treasury Constant Maturity Rate", "interval": "monthly",
        "unit": "percent", "data": [{"date": "2024-02-01", "value": "4.21"}]}"#;
    let (server, client) = server(vec![body]);

    let result = server
        .treasury_yield(Parameters(TreasuryYieldParams {
            interval: None,
            maturity: Some(Maturity::TenYear),
            limit: None,
        }))
        .await
        .unwrap();

    assert!(text(&result).starts_with("== 10-Year Treasury Constant Maturity Rate =="));
    let query = &client.queries()[0];
    assert_eq!(query.function(), "TREASURY_YIELD");
    assert_eq!(query.get("maturity"), Some("10year"));
    assert_eq!(query.get("interval"), None);
}

#[tokio::test]
async fn plain_indicators_send_only_the_function() {
    let body = r#"{"name": "Unemployment Rate", "interval": "monthly", "unit": "percent", "data": []}"#;
    let (server, client) = server(vec![body]);

    let result = server
        .unemployment_rate(Parameters(EconomicParams { limit: Some(5) }))
        .await
        .unwrap();

    assert_eq!(text(&result), "No economic indicator data available");
    assert_eq!(client.queries()[0].pairs().len(), 1);
}

#[tokio::test]
async fn ipo_calendar_groups_csv_rows_by_month() {
    let body = "symbol,name,ipoDate,priceRangeLow,priceRangeHigh,currency,exchange\n\
                BBB,Beta Corp,2024-05-02,0,0,USD,NYSE\n\
                AAA,Alpha Inc,2024-04-18,14,16,USD,NASDAQ\n";
    let (server, client) = server(vec![body]);

    let result = server.ipo_calendar().await.unwrap();

    assert!(!failed(&result));
    assert_eq!(
        text(&result),
        "== Upcoming IPO Calendar ==\nTotal Upcoming IPOs: 2\n\n\
         == April 2024 ==\n4/18/2024 - AAA - Alpha Inc - NASDAQ - Price Range: 14-16 USD\n\n\
         == May 2024 ==\n5/2/2024 - BBB - Beta Corp - NYSE - Price Range: TBD\n"
    );
    let queries = client.queries();
    assert_eq!(queries[0].function(), "IPO_CALENDAR");
    assert_eq!(queries[0].pairs().len(), 1);
}

#[tokio::test]
async fn earnings_calendar_forwards_symbol_and_horizon() {
    let body = "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n\
                IBM,,2024-04-24,2024-03-31,1.50,USD\n\
                IBM,International Business Machines,2024-07-24,2024-06-30,,USD\n";
    let (server, client) = server(vec![body]);

    let result = server
        .earnings_calendar(Parameters(EarningsCalendarParams {
            symbol: Some("IBM".to_string()),
            horizon: Some(EarningsHorizon::SixMonth),
        }))
        .await
        .unwrap();

    assert!(!failed(&result));
    let out = text(&result);
    assert!(out.starts_with(
        "== Upcoming Earnings Calendar ==\nTotal Upcoming Earnings Reports: 2\n\n== April 2024 =="
    ));
    assert!(out.contains(
        "4/24/2024 - IBM - IBM - Estimate: $1.50 - Fiscal Period: 2024-03-31 - USD"
    ));
    assert!(out.contains(
        "== July 2024 ==\n7/24/2024 - IBM - International Business Machines - No estimate available - Fiscal Period: 2024-06-30 - USD"
    ));

    let query = &client.queries()[0];
    assert_eq!(query.function(), "EARNINGS_CALENDAR");
    assert_eq!(query.get("symbol"), Some("IBM"));
    assert_eq!(query.get("horizon"), Some("6month"));
}

#[tokio::test]
async fn calendar_notice_arrives_as_json() {
    let body = r#"{"Information": "The **demo** API key is for demo purposes only."}"#;
    let (server, _) = server(vec![body]);

    let result = server
        .earnings_calendar(Parameters(EarningsCalendarParams {
            symbol: None,
            horizon: None,
        }))
        .await
        .unwrap();

    assert!(!failed(&result));
    assert_eq!(
        text(&result),
        "Error: The **demo** API key is for demo purposes only."
    );
}

#[tokio::test]
async fn news_forwards_filters_and_limit() {
    let body = r#"{
        "items": "50",
        "sentiment_score_definition": "x <= -0.35: Bearish",
        "relevance_score_definition": "0 < x <= 1",
        "feed": [{
            "title": "IBM beats estimates",
            "url": "https://news.test/ibm",
            "time_published": "20240410T013000",
            "authors": ["Jane Doe"],
            "summary": "Strong quarter.",
            "source": "Newswire",
            "overall_sentiment_score": 0.21,
            "overall_sentiment_label": "Somewhat-Bullish"
        }]
    }"#;
    let (server, client) = server(vec![body]);

    let result = server
        .market_news_sentiment(Parameters(NewsParams {
            tickers: Some("IBM".to_string()),
            topics: Some(" ".to_string()),
            time_from: Some("20240410T0130".to_string()),
            time_to: None,
            sort: Some(NewsSort::Relevance),
            limit: Some(5),
        }))
        .await
        .unwrap();

    let out = text(&result);
    assert!(out.starts_with("Market News & Sentiment"));
    assert!(out.contains("Showing 1 articles (of 50 total)"));
    assert!(out.contains("=== Article 1 ===\nTitle: IBM beats estimates\nPublished: 2024-04-10 01:30"));
    assert!(out.contains("Authors: Jane Doe"));

    let query = &client.queries()[0];
    assert_eq!(query.function(), "NEWS_SENTIMENT");
    assert_eq!(query.get("tickers"), Some("IBM"));
    assert_eq!(query.get("topics"), None);
    assert_eq!(query.get("time_from"), Some("20240410T0130"));
    assert_eq!(query.get("time_to"), None);
    assert_eq!(query.get("sort"), Some("RELEVANCE"));
    assert_eq!(query.get("limit"), Some("5"));
}

#[tokio::test]
async fn exchange_rate_sends_both_currencies() {
    let body = r#"{"Realtime Currency Exchange Rate": {
        "1. From_Currency Code": "EUR", "2. From_Currency Name": "Euro",
        "3. To_Currency Code": "USD", "4. To_Currency Name": "United States Dollar",
        "5. Exchange Rate": "1.08360000", "6. Last Refreshed": "2024-04-05 21:55:01",
        "7. Time Zone": "UTC", "8. Bid Price": "1.08355000", "9. Ask Price": "1.08365000"
    }}"#;
    let (server, client) = server(vec![body]);

    let result = server
        .exchange_rate(Parameters(ExchangeRateParams {
            from_currency: "EUR".to_string(),
            to_currency: "USD".to_string(),
        }))
        .await
        .unwrap();

    let out = text(&result);
    assert!(out.starts_with("== Exchange Rate Information ==\nFrom: EUR (Euro)\n"));
    assert!(out.contains("Exchange Rate: 1.08360000"));

    let query = &client.queries()[0];
    assert_eq!(
        query.to_string(),
        "function=CURRENCY_EXCHANGE_RATE&from_currency=EUR&to_currency=USD"
    );
}

#[tokio::test]
async fn daily_fx_series_defaults_to_compact() {
    let body = r#"{
        "Meta Data": {
            "1. Information": "Forex Daily Prices (open, high, low, close)",
            "2. From Symbol": "EUR",
            "3. To Symbol": "USD",
            "4. Output Size": "Compact",
            "5. Last Refreshed": "2024-04-05 21:55:00",
            "6. Time Zone": "UTC"
        },
        "Time Series FX (Daily)": {
            "2024-04-05": {"1. open": "1.0836", "2. high": "1.0876", "3. low": "1.0807", "4. close": "1.0837"},
            "2024-04-04": {"1. open": "1.0836", "2. high": "1.0876", "3. low": "1.0830", "4. close": "1.0836"}
        }
    }"#;
    let (server, client) = server(vec![body]);

    let result = server
        .fx_series(Parameters(FxSeriesParams {
            series_type: FxSeries::Daily,
            from_symbol: "EUR".to_string(),
            to_symbol: "USD".to_string(),
            outputsize: None,
            limit: Some(1),
        }))
        .await
        .unwrap();

    let out = text(&result);
    assert!(out.starts_with(
        "== Daily FX Time Series for EUR/USD ==\nLast Refreshed: 2024-04-05 21:55:00\nTime Zone: UTC\n"
    ));
    assert!(out.contains("== 2024-04-05 ==\nOpen: 1.0836\nHigh: 1.0876\nLow: 1.0807\nClose: 1.0837"));
    assert!(!out.contains("== 2024-04-04 =="));
    assert!(out.ends_with("... and 1 more days (showing last 1 days only)"));

    let query = &client.queries()[0];
    assert_eq!(
        query.to_string(),
        "function=FX_DAILY&from_symbol=EUR&to_symbol=USD&outputsize=compact"
    );
}

#[tokio::test]
async fn weekly_fx_series_ignores_outputsize() {
    let (server, client) = server(vec!["{}"]);

    let result = server
        .fx_series(Parameters(FxSeriesParams {
            series_type: FxSeries::Weekly,
            from_symbol: "EUR".to_string(),
            to_symbol: "USD".to_string(),
            outputsize: Some(OutputSize::Full),
            limit: None,
        }))
        .await
        .unwrap();

    assert_eq!(text(&result), "No weekly FX time series data available");
    let query = &client.queries()[0];
    assert_eq!(query.function(), "FX_WEEKLY");
    assert_eq!(query.get("outputsize"), None);
    assert_eq!(query.pairs().len(), 3);
}

#[tokio::test]
async fn dividends_split_on_today() {
    let body = r#"{"symbol": "IBM", "data": [
        {"ex_dividend_date": "2099-05-09", "declaration_date": "2099-04-30",
         "record_date": "2099-05-10", "payment_date": "2099-06-10", "amount": "1.67"},
        {"ex_dividend_date": "2000-05-09", "declaration_date": "2000-04-25",
         "record_date": "2000-05-10", "payment_date": "2000-06-10", "amount": 0.12}
    ]}"#;
    let (server, client) = server(vec![body]);

    let result = server
        .dividends(Parameters(DividendsParams {
            symbol: "IBM".to_string(),
            show_all_history: None,
        }))
        .await
        .unwrap();

    assert!(!failed(&result));
    let out = text(&result);
    assert!(out.starts_with(
        "== Dividend History for IBM ==\nTotal Records: 2\nAverage Dividend: $0.12\n"
    ));
    assert!(out.contains(
        "== Upcoming Dividends ==\nPayment Date: 2099-06-10 | Ex-Div Date: 2099-05-09 | Amount: $1.67"
    ));
    assert!(out.contains("== Annual Dividend Totals ==\n2000: $0.12"));
    assert!(!out.contains("2099: $"));
    assert!(out.contains(
        "== Recent Dividend History ==\nPayment: 2000-06-10 | Ex-Div: 2000-05-09 | Declared: 2000-04-25 | Amount: $0.12"
    ));
    assert!(!out.contains("Payment: 2099-06-10"));

    let query = &client.queries()[0];
    assert_eq!(query.function(), "DIVIDENDS");
    assert_eq!(query.get("symbol"), Some("IBM"));
}
