//! Digital currency series.

use super::{month_year, more_footer, or_string, UNKNOWN};
use crate::api::crypto::{market_column, CryptoSeries, CryptoSeriesResponse};
use crate::api::Labeled;

pub fn digital_currency(resp: &CryptoSeriesResponse, series: CryptoSeries, limit: usize) -> String {
    let (Some(_), Some(bars)) = (&resp.meta, &resp.series) else {
        return format!("No {} cryptocurrency time series data available", series);
    };

    let meta = |label: &str| or_string(resp.meta(label), UNKNOWN);
    let code = meta("Digital Currency Code");
    let name = meta("Digital Currency Name");
    let market = meta("Market Code");

    let title = match series {
        CryptoSeries::Intraday => format!(
            "== {} Intraday Cryptocurrency Data for {} ({}) ==",
            resp.meta("Interval").unwrap_or_default(),
            code,
            name
        ),
        CryptoSeries::Daily => format!("== Daily Cryptocurrency Data for {} ({}) ==", code, name),
        CryptoSeries::Weekly => format!("== Weekly Cryptocurrency Data for {} ({}) ==", code, name),
        CryptoSeries::Monthly => format!("== Monthly Cryptocurrency Data for {} ({}) ==", code, name),
    };

    let mut lines = vec![
        title,
        format!("Market: {} ({})", market, meta("Market Name")),
        format!("Last Refreshed: {}", meta("Last Refreshed")),
        format!("Time Zone: {}", meta("Time Zone")),
        String::new(),
    ];

    for (date, bar) in bars.iter().rev().take(limit) {
        match series {
            CryptoSeries::Intraday => {
                lines.push(format!("== {} ==", date));
                lines.extend(intraday_bar(bar));
            }
            CryptoSeries::Daily => {
                lines.push(format!("== {} ==", date));
                lines.extend(market_bar(bar, &market));
            }
            CryptoSeries::Weekly => {
                lines.push(format!("== Week Ending {} ==", date));
                lines.extend(market_bar(bar, &market));
            }
            CryptoSeries::Monthly => {
                lines.push(match month_year(date) {
                    Some(month) => format!("== {} ({}) ==", month, date),
                    None => format!("== {} ==", date),
                });
                lines.extend(market_bar(bar, &market));
            }
        }
        lines.push(String::new());
    }

    if bars.len() > limit {
        lines.push(match series {
            CryptoSeries::Intraday => format!(
                "... and {} more data points (showing last {} only)",
                bars.len() - limit,
                limit
            ),
            CryptoSeries::Daily => more_footer(bars.len(), limit, "days").unwrap_or_default(),
            CryptoSeries::Weekly => more_footer(bars.len(), limit, "weeks").unwrap_or_default(),
            CryptoSeries::Monthly => more_footer(bars.len(), limit, "months").unwrap_or_default(),
        });
    }

    lines.join("\n")
}

fn intraday_bar(bar: &Labeled) -> Vec<String> {
    let field = |label: &str| or_string(bar.get(label), UNKNOWN);
    vec![
        format!("Open: {}", field("open")),
        format!("High: {}", field("high")),
        format!("Low: {}", field("low")),
        format!("Close: {}", field("close")),
        format!("Volume: {}", field("volume")),
    ]
}

/// USD and market-denominated prices side by side.
fn market_bar(bar: &Labeled, market: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(10);
    for (title, field) in [("Open", "open"), ("High", "high"), ("Low", "low"), ("Close", "close")] {
        let usd = bar
            .get(&format!("{} (USD)", field))
            .or_else(|| bar.get(field));
        lines.push(format!("{} (USD): {}", title, or_string(usd, UNKNOWN)));
        lines.push(format!(
            "{} ({}): {}",
            title,
            market,
            or_string(market_column(bar, field, market), UNKNOWN)
        ));
    }
    lines.push(format!("Volume: {}", or_string(bar.get("volume"), UNKNOWN)));
    lines.push(format!(
        "Market Cap (USD): {}",
        or_string(bar.get("market cap (USD)"), UNKNOWN)
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn daily_fixture() -> CryptoSeriesResponse {
        serde_json::from_value(json!({
            "Meta Data": {
                "1. Information": "Daily Prices and Volumes for Digital Currency",
                "2. Digital Currency Code": "BTC",
                "3. Digital Currency Name": "Bitcoin",
                "4. Market Code": "EUR",
                "5. Market Name": "Euro",
                "6. Last Refreshed": "2024-04-05 00:00:00",
                "7. Time Zone": "UTC"
            },
            "Time Series (Digital Currency Daily)": {
                "2024-04-04": { "1a. open (EUR)": "60000", "1b. open (USD)": "65000" },
                "2024-04-05": {
                    "1a. open (USD)": "68000",
                    "1b. open (EUR)": "62000",
                    "5. volume": "1200.5",
                    "6. market cap (USD)": "81600000"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn daily_shows_usd_and_market_columns() {
        let text = digital_currency(&daily_fixture(), CryptoSeries::Daily, 1);
        assert!(text.starts_with(
            "== Daily Cryptocurrency Data for BTC (Bitcoin) ==\nMarket: EUR (Euro)\n\
             Last Refreshed: 2024-04-05 00:00:00\nTime Zone: UTC\n\n== 2024-04-05 =="
        ));
        assert!(text.contains("Open (USD): 68000\nOpen (EUR): 62000\nHigh (USD): Unknown"));
        assert!(text.contains("Volume: 1200.5\nMarket Cap (USD): 81600000"));
        assert!(text.ends_with("... and 1 more days (showing last 1 days only)"));
    }

    #[test]
    fn intraday_header_carries_interval() {
        let resp: CryptoSeriesResponse = serde_json::from_value(json!({
            "Meta Data": {
                "2. Digital Currency Code": "ETH",
                "3. Digital Currency Name": "Ethereum",
                "4. Market Code": "USD",
                "5. Market Name": "United States Dollar",
                "7. Interval": "5min",
                "9. Time Zone": "UTC"
            },
            "Time Series Crypto (5min)": {
                "2024-04-05 10:05:00": { "1. open": "3300", "5. volume": "12" },
                "2024-04-05 10:00:00": { "1. open": "3290" }
            }
        }))
        .unwrap();

        let text = digital_currency(&resp, CryptoSeries::Intraday, 10);
        assert!(text.starts_with("== 5min Intraday Cryptocurrency Data for ETH (Ethereum) =="));
        assert!(text.contains("Time Zone: UTC"));
        assert!(text.contains("== 2024-04-05 10:05:00 ==\nOpen: 3300\nHigh: Unknown"));
        assert!(!text.contains("more data points"));
    }

    #[test]
    fn missing_series_names_granularity() {
        assert_eq!(
            digital_currency(&CryptoSeriesResponse::default(), CryptoSeries::Monthly, 10),
            "No monthly cryptocurrency time series data available"
        );
    }
}
