//! Date-keyed OHLC series for equities and forex, plus exchange rates.
//!
//! Every series endpoint wraps its bars in a differently named object
//! (`"Time Series (Daily)"`, `"Weekly Adjusted Time Series"`, ...). They all
//! decode into the same [`TimeSeriesResponse`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_with::serde_as;

use super::{wire_enum, Labeled, Lenient};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta: Option<Labeled>,

    /// Bars keyed by ISO date or timestamp. Keys sort chronologically.
    #[serde(
        rename = "Time Series (Daily)",
        alias = "Weekly Adjusted Time Series",
        alias = "Monthly Adjusted Time Series",
        alias = "Time Series (1min)",
        alias = "Time Series (5min)",
        alias = "Time Series (15min)",
        alias = "Time Series (30min)",
        alias = "Time Series (60min)",
        alias = "Time Series FX (Daily)",
        alias = "Time Series FX (Weekly)",
        alias = "Time Series FX (Monthly)"
    )]
    pub series: Option<BTreeMap<String, Candle>>,
}

impl TimeSeriesResponse {
    pub fn meta(&self, label: &str) -> Option<String> {
        self.meta.as_ref().and_then(|m| m.get(label))
    }

    /// Bars newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = (&String, &Candle)> {
        self.series.iter().flat_map(|s| s.iter().rev())
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Candle {
    #[serde(rename = "1. open")]
    #[serde_as(as = "Lenient")]
    pub open: Option<String>,
    #[serde(rename = "2. high")]
    #[serde_as(as = "Lenient")]
    pub high: Option<String>,
    #[serde(rename = "3. low")]
    #[serde_as(as = "Lenient")]
    pub low: Option<String>,
    #[serde(rename = "4. close")]
    #[serde_as(as = "Lenient")]
    pub close: Option<String>,
    #[serde(rename = "5. adjusted close")]
    #[serde_as(as = "Lenient")]
    pub adjusted_close: Option<String>,
    #[serde(rename = "6. volume", alias = "5. volume")]
    #[serde_as(as = "Lenient")]
    pub volume: Option<String>,
    #[serde(rename = "7. dividend amount")]
    #[serde_as(as = "Lenient")]
    pub dividend: Option<String>,
    #[serde(rename = "8. split coefficient")]
    #[serde_as(as = "Lenient")]
    pub split_coefficient: Option<String>,
}

/// `CURRENCY_EXCHANGE_RATE`, shared by the forex and crypto tools.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    pub rate: Option<Labeled>,
}

wire_enum! {
    /// Forex series granularity.
    pub enum FxSeries {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

impl FxSeries {
    pub fn function(&self) -> &'static str {
        match self {
            FxSeries::Daily => "FX_DAILY",
            FxSeries::Weekly => "FX_WEEKLY",
            FxSeries::Monthly => "FX_MONTHLY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_series_name_decodes_into_the_same_field() {
        for key in [
            "Time Series (Daily)",
            "Weekly Adjusted Time Series",
            "Time Series (15min)",
            "Time Series FX (Monthly)",
        ] {
            let resp: TimeSeriesResponse = serde_json::from_value(json!({
                "Meta Data": { "2. Symbol": "IBM" },
                key: { "2024-01-02": { "1. open": "10.0" } }
            }))
            .unwrap();
            assert_eq!(resp.series.map(|s| s.len()), Some(1), "{}", key);
        }
    }

    #[test]
    fn intraday_volume_uses_fifth_column() {
        let candle: Candle = serde_json::from_value(json!({
            "1. open": "1", "4. close": "2", "5. volume": "300"
        }))
        .unwrap();
        assert_eq!(candle.volume.as_deref(), Some("300"));
        assert_eq!(candle.adjusted_close, None);
    }

    #[test]
    fn bars_iterate_newest_first() {
        let resp: TimeSeriesResponse = serde_json::from_value(json!({
            "Time Series (Daily)": {
                "2024-01-02": {}, "2024-03-01": {}, "2023-12-29": {}
            }
        }))
        .unwrap();
        let dates: Vec<&String> = resp.newest_first().map(|(d, _)| d).collect();
        assert_eq!(dates, ["2024-03-01", "2024-01-02", "2023-12-29"]);
    }
}
