//! Plain-text renderers for provider responses.
//!
//! Every renderer is a pure function of the decoded response (plus "today"
//! where relevant), so the output is deterministic and easy to test.
//! Provider notices are handled before a renderer is called; see
//! [`crate::client::Reply`].

pub mod crypto;
pub mod economy;
pub mod forex;
pub mod fundamental;
pub mod intelligence;
pub mod option_chain;
pub mod stocks;
pub mod technical;
pub mod time;

use chrono::{Datelike, NaiveDate};

pub const UNKNOWN: &str = "Unknown";
pub const NA: &str = "N/A";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `value` unless it is missing or empty.
pub fn or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

/// Owned variant of [`or`] for values looked up from labeled maps.
pub fn or_string(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse a provider number. `"None"`, blanks and non-finite values are
/// missing.
pub fn number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Insert thousands separators into a plain digit string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: i64) -> String {
    let grouped = group_digits(&n.unsigned_abs().to_string());
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Fixed decimals with thousands separators: `1234.5, 2` -> `"1,234.50"`.
pub fn grouped_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };
    let sign = if value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac {
        Some(frac) => format!("{}{}.{}", sign, group_digits(int), frac),
        None => format!("{}{}", sign, group_digits(int)),
    }
}

/// Integer rendering of a provider string, grouped. Fractions are truncated.
pub fn grouped_integer(value: &str) -> Option<String> {
    number(value).map(|n| group_thousands(n.trunc() as i64))
}

/// A fraction shown as a percentage, e.g. `0.1234` -> `"12.34%"`.
pub fn percent(value: Option<&str>, decimals: usize) -> Option<String> {
    value
        .and_then(number)
        .map(|n| format!("{:.*}%", decimals, n * 100.0))
}

/// A signed fraction with an explicit `+` for non-negative values.
pub fn signed(value: f64, decimals: usize) -> String {
    if value >= 0.0 {
        format!("+{:.*}", decimals, value)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Leading `YYYY-MM-DD` of a provider date or timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `"2025-04-30"` -> `"April 2025"`.
pub fn month_year(value: &str) -> Option<String> {
    parse_date(value).map(|d| format!("{} {}", month_name(d), d.year()))
}

/// `"2024-03-31"` -> `"Q1 2024"`.
pub fn quarter(value: &str) -> Option<String> {
    parse_date(value).map(|d| format!("Q{} {}", d.month0() / 3 + 1, d.year()))
}

/// `"2024-09-30"` -> `"H2 2024"`.
pub fn half_year(value: &str) -> Option<String> {
    parse_date(value).map(|d| {
        let half = if d.month0() < 6 { 1 } else { 2 };
        format!("H{} {}", half, d.year())
    })
}

/// `"2024-04-05"` -> `"4/5/2024"`.
pub fn us_date(value: &str) -> String {
    match parse_date(value) {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => value.to_string(),
    }
}

/// Footer appended when a date-keyed series was cut to `limit` rows.
pub fn more_footer(total: usize, limit: usize, unit: &str) -> Option<String> {
    (total > limit).then(|| {
        format!(
            "... and {} more {} (showing last {} {} only)",
            total - limit,
            unit,
            limit,
            unit
        )
    })
}
