//! Technical indicator responses and the indicator families.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{wire_enum, Labeled};

/// Indicator responses name their data object after the indicator
/// (`"Technical Analysis: SMA"`), so the body is kept as an ordered map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TechnicalResponse(pub Map<String, Value>);

impl TechnicalResponse {
    pub fn meta(&self) -> Option<Labeled> {
        match self.0.get("Meta Data") {
            Some(Value::Object(map)) => Some(Labeled(map.clone())),
            _ => None,
        }
    }

    /// Rows of the `Technical Analysis: ...` object, newest first.
    pub fn rows(&self) -> Option<Vec<(&str, &Map<String, Value>)>> {
        let analysis = self
            .0
            .iter()
            .find(|(key, _)| key.starts_with("Technical Analysis:"))
            .and_then(|(_, value)| value.as_object())?;

        let mut rows: Vec<_> = analysis
            .iter()
            .filter_map(|(date, values)| values.as_object().map(|v| (date.as_str(), v)))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(a.0));
        Some(rows)
    }
}

/// Whether an indicator returns several named values per date.
pub fn is_multi_value(function: &str) -> bool {
    matches!(
        function,
        "BBANDS"
            | "MACD"
            | "MACDEXT"
            | "STOCH"
            | "STOCHF"
            | "STOCHRSI"
            | "AROON"
            | "MAMA"
            | "HT_SINE"
            | "HT_PHASOR"
    )
}

wire_enum! {
    /// Bar interval accepted by indicator endpoints.
    pub enum IndicatorInterval {
        OneMin => "1min",
        FiveMin => "5min",
        FifteenMin => "15min",
        ThirtyMin => "30min",
        SixtyMin => "60min",
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

wire_enum! {
    /// Price column an indicator is computed over.
    pub enum SeriesType {
        Close => "close",
        Open => "open",
        High => "high",
        Low => "low",
    }
}

wire_enum! {
    pub enum MovingAverage {
        Sma => "SMA",
        Ema => "EMA",
        Wma => "WMA",
        Dema => "DEMA",
        Tema => "TEMA",
        Trima => "TRIMA",
        Kama => "KAMA",
        Mama => "MAMA",
        Vwap => "VWAP",
        T3 => "T3",
    }
}

wire_enum! {
    pub enum MomentumIndicator {
        Macd => "MACD",
        Macdext => "MACDEXT",
        Stoch => "STOCH",
        Stochf => "STOCHF",
        Rsi => "RSI",
        Stochrsi => "STOCHRSI",
        Willr => "WILLR",
        Adx => "ADX",
        Adxr => "ADXR",
        Apo => "APO",
        Ppo => "PPO",
        Mom => "MOM",
        Bop => "BOP",
        Cci => "CCI",
        Cmo => "CMO",
        Roc => "ROC",
        Rocr => "ROCR",
    }
}

wire_enum! {
    pub enum VolatilityIndicator {
        Bbands => "BBANDS",
        Midpoint => "MIDPOINT",
        Midprice => "MIDPRICE",
        Sar => "SAR",
        Trange => "TRANGE",
        Atr => "ATR",
        Natr => "NATR",
    }
}

wire_enum! {
    pub enum VolumeIndicator {
        Ad => "AD",
        Adosc => "ADOSC",
        Obv => "OBV",
    }
}

wire_enum! {
    /// Hilbert Transform cycle indicators.
    pub enum CycleIndicator {
        HtTrendline => "HT_TRENDLINE",
        HtSine => "HT_SINE",
        HtTrendmode => "HT_TRENDMODE",
        HtDcperiod => "HT_DCPERIOD",
        HtDcphase => "HT_DCPHASE",
        HtPhasor => "HT_PHASOR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_are_sorted_newest_first() {
        let resp: TechnicalResponse = serde_json::from_value(json!({
            "Meta Data": { "1: Symbol": "IBM" },
            "Technical Analysis: SMA": {
                "2024-01-02": { "SMA": "1.0" },
                "2024-01-04": { "SMA": "3.0" },
                "2024-01-03": { "SMA": "2.0" }
            }
        }))
        .unwrap();

        let dates: Vec<&str> = resp.rows().unwrap().iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, ["2024-01-04", "2024-01-03", "2024-01-02"]);
        assert_eq!(resp.meta().and_then(|m| m.get("Symbol")).as_deref(), Some("IBM"));
    }

    #[test]
    fn missing_analysis_key_yields_none() {
        let resp: TechnicalResponse =
            serde_json::from_value(json!({ "Meta Data": {} })).unwrap();
        assert!(resp.rows().is_none());
    }

    #[test]
    fn multi_value_families() {
        let multi: Vec<_> = MomentumIndicator::ALL
            .iter()
            .filter(|i| is_multi_value(i.as_str()))
            .map(|i| i.as_str())
            .collect();
        assert_eq!(multi, ["MACD", "MACDEXT", "STOCH", "STOCHF", "STOCHRSI"]);
        assert!(is_multi_value(MovingAverage::Mama.as_str()));
        assert!(!is_multi_value(CycleIndicator::HtTrendline.as_str()));
    }
}
