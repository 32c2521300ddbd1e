//! Digital currency series.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{wire_enum, Labeled};

/// Crypto bars carry market-specific column names such as
/// `"1b. open (EUR)"`, so each bar is kept as a [`Labeled`] map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CryptoSeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta: Option<Labeled>,

    #[serde(
        rename = "Time Series (Digital Currency Daily)",
        alias = "Time Series (Digital Currency Weekly)",
        alias = "Time Series (Digital Currency Monthly)",
        alias = "Time Series Crypto",
        alias = "Time Series Crypto (1min)",
        alias = "Time Series Crypto (5min)",
        alias = "Time Series Crypto (15min)",
        alias = "Time Series Crypto (30min)",
        alias = "Time Series Crypto (60min)"
    )]
    pub series: Option<BTreeMap<String, Labeled>>,
}

impl CryptoSeriesResponse {
    pub fn meta(&self, label: &str) -> Option<String> {
        self.meta.as_ref().and_then(|m| m.get(label))
    }
}

/// Market-denominated column `field`, e.g. `open (JPY)`. Older responses
/// always label the second market column EUR, so that is tried next, then
/// the unlabeled intraday column.
pub fn market_column(bar: &Labeled, field: &str, market: &str) -> Option<String> {
    bar.get(&format!("{} ({})", field, market))
        .or_else(|| bar.get(&format!("{} (EUR)", field)))
        .or_else(|| bar.get(field))
}

wire_enum! {
    pub enum CryptoSeries {
        Intraday => "intraday",
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

impl CryptoSeries {
    pub fn function(&self) -> &'static str {
        match self {
            CryptoSeries::Intraday => "CRYPTO_INTRADAY",
            CryptoSeries::Daily => "DIGITAL_CURRENCY_DAILY",
            CryptoSeries::Weekly => "DIGITAL_CURRENCY_WEEKLY",
            CryptoSeries::Monthly => "DIGITAL_CURRENCY_MONTHLY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn market_column_falls_back_to_eur() {
        let bar: Labeled = serde_json::from_value(json!({
            "1a. open (USD)": "100",
            "1b. open (EUR)": "92",
            "2b. high (JPY)": "15000"
        }))
        .unwrap();

        assert_eq!(market_column(&bar, "high", "JPY").as_deref(), Some("15000"));
        assert_eq!(market_column(&bar, "open", "JPY").as_deref(), Some("92"));
        assert_eq!(market_column(&bar, "low", "JPY"), None);
    }

    #[test]
    fn intraday_series_key_is_recognised() {
        let resp: CryptoSeriesResponse = serde_json::from_value(json!({
            "Meta Data": { "2. Digital Currency Code": "ETH" },
            "Time Series Crypto (5min)": { "2024-01-02 10:05:00": { "1. open": "2300" } }
        }))
        .unwrap();
        assert_eq!(resp.meta("Digital Currency Code").as_deref(), Some("ETH"));
        assert_eq!(resp.series.map(|s| s.len()), Some(1));
    }
}
