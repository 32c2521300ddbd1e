//! Currency exchange rates and FX series.

use super::{month_year, more_footer, or, or_string, UNKNOWN};
use crate::api::series::{ExchangeRateResponse, FxSeries, TimeSeriesResponse};

/// Which tool asked for the rate; only the banner and empty text differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Currency,
    Crypto,
}

pub fn exchange_rate(resp: &ExchangeRateResponse, kind: RateKind) -> String {
    let Some(rate) = &resp.rate else {
        return "No exchange rate data available".to_string();
    };
    let field = |label: &str| or_string(rate.get(label), UNKNOWN);

    let banner = match kind {
        RateKind::Currency => "== Exchange Rate Information ==",
        RateKind::Crypto => "== Cryptocurrency Exchange Rate Information ==",
    };

    let refreshed = match rate.get("Time Zone") {
        Some(tz) => format!("{} {}", field("Last Refreshed"), tz),
        None => field("Last Refreshed"),
    };

    [
        banner.to_string(),
        format!("From: {} ({})", field("From_Currency Code"), field("From_Currency Name")),
        format!("To: {} ({})", field("To_Currency Code"), field("To_Currency Name")),
        format!("Exchange Rate: {}", field("Exchange Rate")),
        format!("Bid Price: {}", field("Bid Price")),
        format!("Ask Price: {}", field("Ask Price")),
        format!("Last Refreshed: {}", refreshed),
    ]
    .join("\n")
}

pub fn fx_series(resp: &TimeSeriesResponse, series: FxSeries, limit: usize) -> String {
    let (title, unit) = match series {
        FxSeries::Daily => ("Daily", "days"),
        FxSeries::Weekly => ("Weekly", "weeks"),
        FxSeries::Monthly => ("Monthly", "months"),
    };

    let (Some(_), Some(bars)) = (&resp.meta, &resp.series) else {
        return format!("No {} FX time series data available", series);
    };

    let mut lines = vec![
        format!(
            "== {} FX Time Series for {}/{} ==",
            title,
            or_string(resp.meta("From Symbol"), UNKNOWN),
            or_string(resp.meta("To Symbol"), UNKNOWN)
        ),
        format!("Last Refreshed: {}", or_string(resp.meta("Last Refreshed"), UNKNOWN)),
        format!("Time Zone: {}", or_string(resp.meta("Time Zone"), UNKNOWN)),
        String::new(),
    ];

    for (date, bar) in resp.newest_first().take(limit) {
        lines.push(match series {
            FxSeries::Daily => format!("== {} ==", date),
            FxSeries::Weekly => format!("== Week Ending {} ==", date),
            FxSeries::Monthly => match month_year(date) {
                Some(month) => format!("== {} ({}) ==", month, date),
                None => format!("== {} ==", date),
            },
        });
        lines.push(format!("Open: {}", or(bar.open.as_deref(), UNKNOWN)));
        lines.push(format!("High: {}", or(bar.high.as_deref(), UNKNOWN)));
        lines.push(format!("Low: {}", or(bar.low.as_deref(), UNKNOWN)));
        lines.push(format!("Close: {}", or(bar.close.as_deref(), UNKNOWN)));
        lines.push(String::new());
    }

    lines.extend(more_footer(bars.len(), limit, unit));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exchange_rate_block() {
        let resp: ExchangeRateResponse = serde_json::from_value(json!({
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "USD",
                "2. From_Currency Name": "United States Dollar",
                "3. To_Currency Code": "JPY",
                "4. To_Currency Name": "Japanese Yen",
                "5. Exchange Rate": "151.61",
                "6. Last Refreshed": "2024-04-05 21:55:01",
                "7. Time Zone": "UTC",
                "8. Bid Price": "151.60",
                "9. Ask Price": "151.62"
            }
        }))
        .unwrap();

        assert_eq!(
            exchange_rate(&resp, RateKind::Currency),
            "== Exchange Rate Information ==\n\
             From: USD (United States Dollar)\n\
             To: JPY (Japanese Yen)\n\
             Exchange Rate: 151.61\n\
             Bid Price: 151.60\n\
             Ask Price: 151.62\n\
             Last Refreshed: 2024-04-05 21:55:01 UTC"
        );
    }

    #[test]
    fn crypto_banner_and_missing_zone() {
        let resp: ExchangeRateResponse = serde_json::from_value(json!({
            "Realtime Currency Exchange Rate": { "1. From_Currency Code": "BTC" }
        }))
        .unwrap();
        let text = exchange_rate(&resp, RateKind::Crypto);
        assert!(text.starts_with("== Cryptocurrency Exchange Rate Information ==\nFrom: BTC (Unknown)"));
        assert!(text.ends_with("Last Refreshed: Unknown"));
        assert_eq!(
            exchange_rate(&ExchangeRateResponse::default(), RateKind::Currency),
            "No exchange rate data available"
        );
    }

    #[test]
    fn monthly_fx_labels_months() {
        let resp: TimeSeriesResponse = serde_json::from_value(json!({
            "Meta Data": {
                "2. From Symbol": "EUR",
                "3. To Symbol": "USD",
                "4. Last Refreshed": "2025-04-30",
                "5. Time Zone": "UTC"
            },
            "Time Series FX (Monthly)": {
                "2025-03-31": { "1. open": "1.03" },
                "2025-04-30": { "1. open": "1.08", "4. close": "1.13" }
            }
        }))
        .unwrap();

        let text = fx_series(&resp, FxSeries::Monthly, 1);
        assert!(text.starts_with(
            "== Monthly FX Time Series for EUR/USD ==\nLast Refreshed: 2025-04-30\nTime Zone: UTC\n\n\
             == April 2025 (2025-04-30) ==\nOpen: 1.08"
        ));
        assert!(text.contains("Close: 1.13"));
        assert!(text.ends_with("... and 1 more months (showing last 1 months only)"));
    }

    #[test]
    fn missing_series_names_granularity() {
        assert_eq!(
            fx_series(&TimeSeriesResponse::default(), FxSeries::Weekly, 10),
            "No weekly FX time series data available"
        );
    }
}
