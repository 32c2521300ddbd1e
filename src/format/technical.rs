//! Technical indicator tables.

use serde_json::Value;

use super::{or_string, UNKNOWN};
use crate::api::technical::{is_multi_value, TechnicalResponse};
use crate::api::text;

fn cell(value: Option<&Value>) -> String {
    value.and_then(text).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Render an indicator response. `function` picks the single-value layout
/// (`date: KEY = value`) or one block per date for multi-value indicators.
pub fn indicator(resp: &TechnicalResponse, function: &str, limit: usize) -> String {
    let Some(meta) = resp.meta() else {
        return "No technical indicator data available".to_string();
    };
    let Some(rows) = resp.rows() else {
        return "No technical analysis data available".to_string();
    };

    let mut lines = vec![
        format!(
            "== {} ({}) ==",
            or_string(meta.get("Indicator"), "Unknown Indicator"),
            or_string(meta.get("Symbol"), UNKNOWN)
        ),
        format!("Last Refreshed: {}", or_string(meta.get("Last Refreshed"), UNKNOWN)),
    ];
    if let Some(interval) = meta.get("Interval") {
        lines.push(format!("Interval: {}", interval));
    }
    if let Some(period) = meta.get("Time Period") {
        lines.push(format!("Time Period: {}", period));
    }
    if let Some(series) = meta.get("Series Type") {
        lines.push(format!("Series Type: {}", series));
    }

    // Column names come from the newest row.
    let keys: Vec<&str> = rows
        .first()
        .map(|(_, values)| values.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let more = rows.len().saturating_sub(limit);

    if is_multi_value(function) {
        for (date, values) in rows.iter().take(limit) {
            lines.push(format!("== {} ==", date));
            for key in &keys {
                lines.push(format!("{}: {}", key, cell(values.get(*key))));
            }
            lines.push(String::new());
        }
        if more > 0 {
            lines.push(format!(
                "... and {} more data points (showing latest {} only)",
                more, limit
            ));
        }
    } else {
        let Some(key) = keys.first() else {
            return lines.join("\n");
        };
        for (date, values) in rows.iter().take(limit) {
            lines.push(format!("{}: {} = {}", date, key, cell(values.get(*key))));
        }
        if more > 0 {
            lines.push(format!(
                "\n... and {} more data points (showing latest {} only)",
                more, limit
            ));
        }
    }

    lines.join("\n")
}
