//! Realtime and historical option chains.

use serde::Deserialize;
use serde_with::serde_as;

use super::Lenient;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionChainResponse {
    pub endpoint: Option<String>,
    /// Premium notice on realtime chains, `"success"` on historical ones.
    pub message: Option<String>,
    pub data: Option<Vec<OptionContract>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionContract {
    #[serde(rename = "contractID")]
    #[serde_as(as = "Lenient")]
    pub contract_id: Option<String>,
    #[serde_as(as = "Lenient")]
    pub symbol: Option<String>,
    #[serde_as(as = "Lenient")]
    pub expiration: Option<String>,
    #[serde_as(as = "Lenient")]
    pub strike: Option<String>,
    #[serde(rename = "type")]
    #[serde_as(as = "Lenient")]
    pub kind: Option<String>,
    #[serde_as(as = "Lenient")]
    pub last: Option<String>,
    #[serde_as(as = "Lenient")]
    pub mark: Option<String>,
    #[serde_as(as = "Lenient")]
    pub bid: Option<String>,
    #[serde_as(as = "Lenient")]
    pub bid_size: Option<String>,
    #[serde_as(as = "Lenient")]
    pub ask: Option<String>,
    #[serde_as(as = "Lenient")]
    pub ask_size: Option<String>,
    #[serde_as(as = "Lenient")]
    pub volume: Option<String>,
    #[serde_as(as = "Lenient")]
    pub open_interest: Option<String>,
    #[serde_as(as = "Lenient")]
    pub date: Option<String>,
    #[serde_as(as = "Lenient")]
    pub implied_volatility: Option<String>,
    #[serde_as(as = "Lenient")]
    pub delta: Option<String>,
    #[serde_as(as = "Lenient")]
    pub gamma: Option<String>,
    #[serde_as(as = "Lenient")]
    pub theta: Option<String>,
    #[serde_as(as = "Lenient")]
    pub vega: Option<String>,
    #[serde_as(as = "Lenient")]
    pub rho: Option<String>,
}

impl OptionContract {
    /// Numeric strike for ordering; unparsable strikes sort as zero.
    pub fn strike_value(&self) -> f64 {
        self.strike
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0.0)
    }
}
