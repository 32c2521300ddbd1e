//! Quotes, search results, market status and equity time series.

use itertools::Itertools;

use super::{more_footer, or, or_string, UNKNOWN};
use crate::api::series::TimeSeriesResponse;
use crate::api::stocks::{BulkQuotesResponse, GlobalQuoteResponse, MarketStatusResponse, SymbolSearchResponse};

pub fn quote(resp: &GlobalQuoteResponse) -> String {
    let Some(q) = &resp.quote else {
        return "No quote data available".to_string();
    };

    [
        format!("Symbol: {}", or(q.symbol.as_deref(), UNKNOWN)),
        format!("Price: {}", or(q.price.as_deref(), UNKNOWN)),
        format!("Open: {}", or(q.open.as_deref(), UNKNOWN)),
        format!("High: {}", or(q.high.as_deref(), UNKNOWN)),
        format!("Low: {}", or(q.low.as_deref(), UNKNOWN)),
        format!("Volume: {}", or(q.volume.as_deref(), UNKNOWN)),
        format!("Trading Day: {}", or(q.latest_trading_day.as_deref(), UNKNOWN)),
        format!("Previous Close: {}", or(q.previous_close.as_deref(), UNKNOWN)),
        format!(
            "Change: {} ({})",
            or(q.change.as_deref(), UNKNOWN),
            or(q.change_percent.as_deref(), UNKNOWN)
        ),
    ]
    .join("\n")
}

pub fn search(resp: &SymbolSearchResponse) -> String {
    let matches = resp.best_matches.as_deref().unwrap_or_default();
    if matches.is_empty() {
        return "No matching symbols found".to_string();
    }

    matches
        .iter()
        .map(|m| {
            [
                format!("Symbol: {}", or(m.symbol.as_deref(), UNKNOWN)),
                format!("Name: {}", or(m.name.as_deref(), UNKNOWN)),
                format!("Type: {}", or(m.kind.as_deref(), UNKNOWN)),
                format!("Region: {}", or(m.region.as_deref(), UNKNOWN)),
                format!("Currency: {}", or(m.currency.as_deref(), UNKNOWN)),
                format!("Match Score: {}", or(m.match_score.as_deref(), UNKNOWN)),
            ]
            .join("\n")
        })
        .join("\n\n")
}

/// Markets grouped by type, types in order of first appearance.
pub fn market_status(resp: &MarketStatusResponse) -> String {
    let markets = resp.markets.as_deref().unwrap_or_default();
    if markets.is_empty() {
        return "No market status data available".to_string();
    }

    let mut lines = vec![format!(
        "{}\n",
        or(resp.endpoint.as_deref(), "Global Market Open & Close Status")
    )];

    let types = markets.iter().map(|m| m.market_type.as_deref()).unique();
    for market_type in types {
        lines.push(format!("\n== {} Markets ==", market_type.unwrap_or(UNKNOWN)));

        for market in markets.iter().filter(|m| m.market_type.as_deref() == market_type) {
            lines.push(format!("\nRegion: {}", or(market.region.as_deref(), UNKNOWN)));
            lines.push(format!(
                "Exchanges: {}",
                or(market.primary_exchanges.as_deref(), UNKNOWN)
            ));
            lines.push(format!(
                "Hours: {} - {}",
                or(market.local_open.as_deref(), "?"),
                or(market.local_close.as_deref(), "?")
            ));
            lines.push(format!(
                "Status: {}",
                market
                    .current_status
                    .as_deref()
                    .map(str::to_uppercase)
                    .unwrap_or_else(|| UNKNOWN.to_string())
            ));
            if let Some(notes) = &market.notes {
                lines.push(format!("Notes: {}", notes));
            }
        }
    }

    lines.join("\n")
}

pub fn bulk_quotes(resp: &BulkQuotesResponse) -> String {
    if let Some(message) = resp.message.as_deref().filter(|m| !m.is_empty()) {
        return format!("Message: {}", message);
    }

    let quotes = resp.data.as_deref().unwrap_or_default();
    if quotes.is_empty() {
        return "No quote data available".to_string();
    }

    let mut lines = vec![format!("{}\n", or(resp.endpoint.as_deref(), "Realtime Bulk Quotes"))];

    for q in quotes {
        lines.push(format!("\n== {} ==", or(q.symbol.as_deref(), UNKNOWN)));
        lines.push(format!("Timestamp: {}", or(q.timestamp.as_deref(), UNKNOWN)));
        lines.push(format!("Price: {}", or(q.close.as_deref(), UNKNOWN)));
        lines.push(format!("Open: {}", or(q.open.as_deref(), UNKNOWN)));
        lines.push(format!("High: {}", or(q.high.as_deref(), UNKNOWN)));
        lines.push(format!("Low: {}", or(q.low.as_deref(), UNKNOWN)));
        lines.push(format!("Volume: {}", or(q.volume.as_deref(), UNKNOWN)));
        lines.push(format!("Previous Close: {}", or(q.previous_close.as_deref(), UNKNOWN)));
        lines.push(format!(
            "Change: {} ({}%)",
            or(q.change.as_deref(), UNKNOWN),
            or(q.change_percent.as_deref(), UNKNOWN)
        ));

        if let Some(price) = &q.extended_hours_quote {
            lines.push(format!("\nExtended Hours Price: {}", price));
            lines.push(format!(
                "Extended Hours Change: {} ({}%)",
                or(q.extended_hours_change.as_deref(), UNKNOWN),
                or(q.extended_hours_change_percent.as_deref(), UNKNOWN)
            ));
        }
    }

    lines.join("\n")
}

/// Granularity of an adjusted equity series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjusted {
    Monthly,
    Weekly,
    Daily,
}

impl Adjusted {
    pub fn function(self) -> &'static str {
        match self {
            Adjusted::Monthly => "TIME_SERIES_MONTHLY_ADJUSTED",
            Adjusted::Weekly => "TIME_SERIES_WEEKLY_ADJUSTED",
            Adjusted::Daily => "TIME_SERIES_DAILY_ADJUSTED",
        }
    }

    pub fn default_limit(self) -> usize {
        match self {
            Adjusted::Monthly | Adjusted::Weekly => 12,
            Adjusted::Daily => 20,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Adjusted::Monthly => "Monthly",
            Adjusted::Weekly => "Weekly",
            Adjusted::Daily => "Daily",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Adjusted::Monthly => "months",
            Adjusted::Weekly => "weeks",
            Adjusted::Daily => "days",
        }
    }
}

pub fn adjusted_series(resp: &TimeSeriesResponse, kind: Adjusted, limit: usize) -> String {
    let (Some(_), Some(series)) = (&resp.meta, &resp.series) else {
        return "No time series data available".to_string();
    };

    let mut lines = vec![
        format!(
            "{} Adjusted Time Series for {}",
            kind.title(),
            or_string(resp.meta("Symbol"), UNKNOWN)
        ),
        format!("Last Refreshed: {}", or_string(resp.meta("Last Refreshed"), UNKNOWN)),
    ];
    if kind == Adjusted::Daily {
        lines.push(format!("Output Size: {}", or_string(resp.meta("Output Size"), UNKNOWN)));
    }
    lines.push(format!("Time Zone: {}", or_string(resp.meta("Time Zone"), UNKNOWN)));
    lines.push(String::new());

    for (date, bar) in resp.newest_first().take(limit) {
        match kind {
            Adjusted::Weekly => lines.push(format!("== Week ending {} ==", date)),
            _ => lines.push(format!("== {} ==", date)),
        }
        lines.push(format!("Open: {}", or(bar.open.as_deref(), UNKNOWN)));
        lines.push(format!("High: {}", or(bar.high.as_deref(), UNKNOWN)));
        lines.push(format!("Low: {}", or(bar.low.as_deref(), UNKNOWN)));
        lines.push(format!("Close: {}", or(bar.close.as_deref(), UNKNOWN)));
        lines.push(format!("Adjusted Close: {}", or(bar.adjusted_close.as_deref(), UNKNOWN)));
        lines.push(format!("Volume: {}", or(bar.volume.as_deref(), UNKNOWN)));
        lines.push(format!("Dividend: {}", or(bar.dividend.as_deref(), "0.0000")));
        if kind == Adjusted::Daily {
            lines.push(format!(
                "Split Coefficient: {}",
                or(bar.split_coefficient.as_deref(), "1.0")
            ));
        }
        lines.push(String::new());
    }

    lines.extend(more_footer(series.len(), limit, kind.unit()));
    lines.join("\n")
}

pub fn intraday(resp: &TimeSeriesResponse, limit: usize) -> String {
    if resp.meta.is_none() {
        return "No meta data available".to_string();
    }

    let interval = or_string(resp.meta("Interval"), UNKNOWN);
    let Some(series) = &resp.series else {
        return format!("No time series data available for interval: {}", interval);
    };

    let mut lines = vec![
        format!(
            "Intraday ({}) Time Series for {}",
            interval,
            or_string(resp.meta("Symbol"), UNKNOWN)
        ),
        format!("Last Refreshed: {}", or_string(resp.meta("Last Refreshed"), UNKNOWN)),
        format!("Output Size: {}", or_string(resp.meta("Output Size"), UNKNOWN)),
        format!("Time Zone: {}", or_string(resp.meta("Time Zone"), UNKNOWN)),
        String::new(),
    ];

    for (timestamp, bar) in resp.newest_first().take(limit) {
        lines.push(format!("== {} ==", timestamp));
        lines.push(format!("Open: {}", or(bar.open.as_deref(), UNKNOWN)));
        lines.push(format!("High: {}", or(bar.high.as_deref(), UNKNOWN)));
        lines.push(format!("Low: {}", or(bar.low.as_deref(), UNKNOWN)));
        lines.push(format!("Close: {}", or(bar.close.as_deref(), UNKNOWN)));
        lines.push(format!("Volume: {}", or(bar.volume.as_deref(), UNKNOWN)));
        lines.push(String::new());
    }

    if series.len() > limit {
        lines.push(format!(
            "... and {} more data points (showing last {} intervals only)",
            series.len() - limit,
            limit
        ));
    }

    lines.join("\n")
}
