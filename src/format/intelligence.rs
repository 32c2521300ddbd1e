//! News, transcripts, market movers, insider activity and analytics.

use itertools::Itertools;
use serde_json::{Map, Value};

use super::{group_thousands, grouped_fixed, number, or, NA, UNKNOWN};
use crate::api::intelligence::{
    AnalyticsResponse, InsiderResponse, MarketMoversResponse, NewsResponse, TickerMove,
    TranscriptResponse,
};
use crate::api::text;

fn shown(value: Option<&Value>) -> String {
    value.and_then(text).unwrap_or_else(|| NA.to_string())
}

/// `20240405T153000` -> `2024-04-05 15:30`.
fn published(stamp: &str) -> Option<String> {
    let part = |range: std::ops::Range<usize>| stamp.get(range);
    Some(format!(
        "{}-{}-{} {}:{}",
        part(0..4)?,
        part(4..6)?,
        part(6..8)?,
        part(9..11)?,
        part(11..13)?
    ))
}

pub fn news(resp: &NewsResponse) -> String {
    let feed = resp.feed.as_deref().unwrap_or_default();
    if feed.is_empty() {
        return "No news data available".to_string();
    }

    let mut lines = vec!["Market News & Sentiment".to_string()];
    if let Some(definition) = &resp.sentiment_score_definition {
        lines.push(format!("\nSentiment Score: {}", definition));
    }
    if let Some(definition) = &resp.relevance_score_definition {
        lines.push(format!("Relevance Score: {}", definition));
    }
    match resp.items.as_ref().and_then(text) {
        Some(total) => lines.push(format!("\nShowing {} articles (of {} total)", feed.len(), total)),
        None => lines.push(format!("\nShowing {} articles", feed.len())),
    }

    for (i, article) in feed.iter().enumerate() {
        lines.push(format!("\n=== Article {} ===", i + 1));
        lines.push(format!("Title: {}", or(article.title.as_deref(), NA)));
        lines.push(format!(
            "Published: {}",
            article
                .time_published
                .as_deref()
                .and_then(published)
                .unwrap_or_else(|| NA.to_string())
        ));
        lines.push(match &article.category_within_source {
            Some(category) => format!("Source: {} ({})", or(article.source.as_deref(), NA), category),
            None => format!("Source: {}", or(article.source.as_deref(), NA)),
        });
        if !article.authors.is_empty() {
            lines.push(format!("Authors: {}", article.authors.join(", ")));
        }
        lines.push(format!("URL: {}", or(article.url.as_deref(), NA)));
        if let Some(summary) = &article.summary {
            lines.push(format!("\nSummary: {}", summary));
        }
        lines.push(format!(
            "Overall Sentiment: {} ({})",
            or(article.overall_sentiment_label.as_deref(), NA),
            shown(article.overall_sentiment_score.as_ref())
        ));

        if !article.topics.is_empty() {
            lines.push("\nTopics:".to_string());
            for topic in &article.topics {
                lines.push(format!(
                    "- {} (Relevance: {})",
                    or(topic.topic.as_deref(), NA),
                    shown(topic.relevance_score.as_ref())
                ));
            }
        }

        if !article.ticker_sentiment.is_empty() {
            lines.push("\nTicker Sentiment:".to_string());
            for ticker in &article.ticker_sentiment {
                lines.push(format!(
                    "- {}: {} (Score: {}, Relevance: {})",
                    or(ticker.ticker.as_deref(), NA),
                    or(ticker.ticker_sentiment_label.as_deref(), NA),
                    shown(ticker.ticker_sentiment_score.as_ref()),
                    shown(ticker.relevance_score.as_ref())
                ));
            }
        }
    }

    lines.join("\n")
}

pub fn transcript(resp: &TranscriptResponse) -> String {
    let segments = resp.transcript.as_deref().unwrap_or_default();
    if segments.is_empty() {
        return "No transcript data available".to_string();
    }

    let scores: Vec<f64> = segments
        .iter()
        .filter_map(|s| s.sentiment.as_ref().and_then(text))
        .filter_map(|s| number(&s))
        .collect();
    let average = if scores.is_empty() {
        NA.to_string()
    } else {
        format!("{:.2}", scores.iter().sum::<f64>() / scores.len() as f64)
    };

    let mut lines = vec![
        format!(
            "Earnings Call Transcript: {} - {}",
            or(resp.symbol.as_deref(), UNKNOWN),
            or(resp.quarter.as_deref(), UNKNOWN)
        ),
        format!("Overall Sentiment Score: {}", average),
        "\n--- Transcript ---".to_string(),
    ];

    for (i, segment) in segments.iter().enumerate() {
        lines.push(format!(
            "\n[{} - {}]",
            or(segment.speaker.as_deref(), UNKNOWN),
            or(segment.title.as_deref(), "No Title")
        ));
        lines.push(format!("Sentiment: {}", shown(segment.sentiment.as_ref())));
        lines.push(format!(
            "\n{}",
            or(segment.content.as_deref(), "No content available")
        ));
        if i + 1 < segments.len() {
            lines.push("\n---".to_string());
        }
    }

    lines.join("\n")
}

/// `123456789` -> `123.46M`; small volumes are grouped.
fn volume(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return NA.to_string();
    };
    let Some(n) = number(raw).map(f64::trunc) else {
        return raw.to_string();
    };

    if n >= 1e9 {
        format!("{:.2}B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else if n >= 1e3 {
        group_thousands(n as i64)
    } else {
        raw.to_string()
    }
}

fn push_movers(lines: &mut Vec<String>, title: &str, movers: &[TickerMove]) {
    if movers.is_empty() {
        return;
    }
    lines.push(format!("\n=== {} ===", title));
    for (i, m) in movers.iter().enumerate() {
        lines.push(format!("\n{}. {}", i + 1, or(m.ticker.as_deref(), NA)));
        lines.push(format!("   Price: ${}", or(m.price.as_deref(), NA)));
        lines.push(format!(
            "   Change: {} ({})",
            or(m.change_amount.as_deref(), NA),
            or(m.change_percentage.as_deref(), NA)
        ));
        lines.push(format!("   Volume: {}", volume(m.volume.as_deref())));
    }
}

pub fn market_movers(resp: &MarketMoversResponse) -> String {
    let mut lines = vec![
        or(
            resp.metadata.as_deref(),
            "Top Gainers, Losers, and Most Actively Traded US Tickers",
        )
        .to_string(),
        format!("Last Updated: {}", or(resp.last_updated.as_deref(), NA)),
    ];
    push_movers(&mut lines, "TOP GAINERS", &resp.top_gainers);
    push_movers(&mut lines, "TOP LOSERS", &resp.top_losers);
    push_movers(&mut lines, "MOST ACTIVELY TRADED", &resp.most_actively_traded);
    lines.join("\n")
}

pub fn insider_transactions(resp: &InsiderResponse) -> String {
    let transactions = resp.data.as_deref().unwrap_or_default();
    let Some(first) = transactions.first() else {
        return "No insider transactions data available".to_string();
    };

    let mut lines = vec![format!(
        "Insider Transactions for {}",
        or(first.ticker.as_deref(), UNKNOWN)
    )];

    for t in transactions.iter().take(10) {
        lines.push(format!(
            "\n=== {} ===",
            or(t.transaction_date.as_deref(), "Unknown Date")
        ));
        lines.push(format!(
            "\n{} ({})",
            or(t.executive.as_deref(), "Unknown Executive"),
            or(t.executive_title.as_deref(), "Unknown Title")
        ));
        let kind = match t.acquisition_or_disposal.as_deref() {
            Some("A") => "ACQUISITION",
            Some("D") => "DISPOSAL",
            _ => "TRANSACTION",
        };
        lines.push(format!(
            "Type: {} of {}",
            kind,
            or(t.security_type.as_deref(), "Securities")
        ));

        let shares = or(t.shares.as_deref(), "0");
        let price = or(t.share_price.as_deref(), "0");
        let total = match (number(shares), number(price)) {
            (Some(s), Some(p)) => grouped_fixed(s * p, 2),
            _ => NA.to_string(),
        };
        lines.push(format!("Shares: {} @ ${} = ${}", shares, price, total));
    }

    lines.join("\n")
}

fn fixed(value: Option<&Value>, decimals: usize) -> String {
    match value.and_then(Value::as_f64) {
        Some(n) => format!("{:.*}", decimals, n),
        None => NA.to_string(),
    }
}

/// Lower triangle of a correlation or covariance matrix.
fn push_matrix(lines: &mut Vec<String>, data: &Value) {
    let index: Vec<String> = data
        .get("index")
        .and_then(Value::as_array)
        .map(|ix| ix.iter().filter_map(text).collect())
        .unwrap_or_default();
    let matrix = data
        .get("correlation")
        .or_else(|| data.get("covariance"))
        .and_then(Value::as_array)
        .filter(|m| !m.is_empty());

    let Some(matrix) = matrix.filter(|_| !index.is_empty()) else {
        lines.push("No matrix data available".to_string());
        return;
    };

    lines.push(format!(
        "           {}",
        index.iter().map(|s| format!("{:>12}", s)).join("")
    ));
    for (i, symbol) in index.iter().enumerate() {
        let row = matrix.get(i).and_then(Value::as_array);
        let cells = (0..=i)
            .map(|j| format!("{:>12}", fixed(row.and_then(|r| r.get(j)), 4)))
            .join("");
        lines.push(format!("{:<10}{}", symbol, cells));
    }
}

fn push_histogram(lines: &mut Vec<String>, data: &Value) {
    let bins: Vec<f64> = data
        .get("bins")
        .and_then(Value::as_array)
        .map(|b| b.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();
    let counts = data.get("counts").and_then(Value::as_object);

    let Some(counts) = counts.filter(|c| !c.is_empty() && !bins.is_empty()) else {
        lines.push("No histogram data available".to_string());
        return;
    };

    lines.push(format!(
        "Bin Range    {}",
        counts.keys().map(|s| format!("{:>8}", s)).join("  ")
    ));
    for (i, pair) in bins.windows(2).enumerate() {
        let mut row = format!("{:<12}", format!("{:.3} to {:.3}", pair[0], pair[1]));
        for series in counts.values() {
            let count = series
                .get(i)
                .and_then(text)
                .unwrap_or_else(|| "0".to_string());
            row.push_str(&format!("{:>8}  ", count));
        }
        lines.push(row);
    }
}

fn push_scalars(lines: &mut Vec<String>, calculation: &str, data: &Map<String, Value>) {
    for (symbol, value) in data {
        let shown = match value.as_f64() {
            Some(n) if calculation == "CUMULATIVE_RETURN" || calculation.contains("DRAWDOWN") => {
                format!("{:.2}%", n * 100.0)
            }
            Some(n) if calculation == "VARIANCE" || calculation == "STDDEV" => format!("{:.6}", n),
            Some(n) => format!("{:.4}", n),
            None => text(value).unwrap_or_else(|| value.to_string()),
        };
        lines.push(format!("{}: {}", symbol, shown));
    }
}

pub fn analytics(resp: &AnalyticsResponse) -> String {
    let (Some(meta), Some(payload)) = (&resp.meta_data, &resp.payload) else {
        return "No analytics data available".to_string();
    };

    let mut lines = vec![
        "Advanced Analytics (Fixed Window)".to_string(),
        format!("\nSymbols: {}", or(meta.symbols.as_deref(), NA)),
        format!(
            "Date Range: {} to {}",
            or(meta.min_dt.as_deref(), NA),
            or(meta.max_dt.as_deref(), NA)
        ),
        format!("Data Type: {}", or(meta.ohlc.as_deref(), "Close")),
        format!("Interval: {}", or(meta.interval.as_deref(), NA)),
    ];

    let Some(calculations) = &payload.returns_calculations else {
        return format!("{}\n\nNo calculations data available", lines.join("\n"));
    };

    lines.push("\n=== CALCULATIONS ===".to_string());
    for (name, data) in calculations {
        lines.push(format!("\n--- {} ---", name));
        match name.as_str() {
            "CORRELATION" | "COVARIANCE" => push_matrix(&mut lines, data),
            "HISTOGRAM" => push_histogram(&mut lines, data),
            _ => match data.as_object() {
                Some(map) => push_scalars(&mut lines, name, map),
                None => lines.push(shown(Some(data))),
            },
        }
    }

    lines.join("\n")
}
