//! Commodity prices and economic indicators.

use chrono::Datelike;

use super::{half_year, month_year, parse_date, quarter, or, UNKNOWN};
use crate::api::economy::MacroSeriesResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    Commodity,
    Economic,
}

/// Date label for a data point, chosen by the series interval.
fn period_label(interval: Option<&str>, date: &str) -> String {
    let label = match interval {
        Some("monthly") => month_year(date),
        Some("quarterly") => quarter(date),
        Some("annual") | Some("yearly") => parse_date(date).map(|d| d.year().to_string()),
        Some("semiannual") => half_year(date),
        _ => None,
    };
    label.unwrap_or_else(|| date.to_string())
}

pub fn macro_series(resp: &MacroSeriesResponse, kind: MacroKind, limit: usize) -> String {
    let points = resp.data.as_deref().unwrap_or_default();
    let name = resp.name.as_deref().filter(|n| !n.is_empty());
    let Some(name) = name.filter(|_| !points.is_empty()) else {
        return match kind {
            MacroKind::Commodity => "No commodity data available".to_string(),
            MacroKind::Economic => "No economic indicator data available".to_string(),
        };
    };

    let interval = resp.interval.as_deref().filter(|i| !i.is_empty());
    let unit = resp.unit.as_deref().filter(|u| !u.is_empty());

    let mut lines = vec![
        format!("== {} ==", name),
        format!("Interval: {}", or(interval, UNKNOWN)),
        format!("Unit: {}", or(unit, UNKNOWN)),
        String::new(),
    ];

    for point in points.iter().take(limit) {
        let label = period_label(interval, &point.date);
        lines.push(match unit {
            Some(unit) => format!("{}: {} {}", label, point.value, unit),
            None => format!("{}: {}", label, point.value),
        });
    }

    if points.len() > limit {
        lines.push(format!(
            "\n... and {} more data points (showing latest {} only)",
            points.len() - limit,
            limit
        ));
    }

    lines.join("\n")
}
