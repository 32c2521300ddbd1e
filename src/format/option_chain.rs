//! Option chains grouped by expiration.

use itertools::Itertools;

use super::{or, NA, UNKNOWN};
use crate::api::option_chain::{OptionChainResponse, OptionContract};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Realtime,
    Historical,
}

pub fn options(resp: &OptionChainResponse, chain: Chain) -> String {
    let message = resp.message.as_deref().filter(|m| !m.is_empty());
    let message = match chain {
        // Historical chains report "success" in the same field.
        Chain::Historical => message.filter(|m| *m != "success"),
        Chain::Realtime => message,
    };
    if let Some(message) = message {
        return format!("Message: {}", message);
    }

    let contracts = resp.data.as_deref().unwrap_or_default();
    if contracts.is_empty() {
        return match chain {
            Chain::Realtime => "No options data available".to_string(),
            Chain::Historical => "No historical options data available".to_string(),
        };
    }

    let header = match chain {
        Chain::Realtime => format!("{}\n", or(resp.endpoint.as_deref(), "Realtime Options")),
        Chain::Historical => format!(
            "{} - {}\n",
            or(resp.endpoint.as_deref(), "Historical Options"),
            or(contracts[0].date.as_deref(), "Unknown Date")
        ),
    };
    let mut lines = vec![header];

    let expirations = contracts
        .iter()
        .map(|c| c.expiration.as_deref().unwrap_or_default())
        .unique()
        .sorted();

    for expiration in expirations {
        lines.push(format!("\n== Expiration: {} ==", expiration));

        let by_strike = contracts
            .iter()
            .filter(|c| c.expiration.as_deref().unwrap_or_default() == expiration)
            .sorted_by(|a, b| a.strike_value().total_cmp(&b.strike_value()));

        for contract in by_strike {
            push_contract(&mut lines, contract, expiration, chain);
        }
    }

    lines.join("\n")
}

fn push_contract(lines: &mut Vec<String>, c: &OptionContract, expiration: &str, chain: Chain) {
    let na = |v: &Option<String>| or(v.as_deref(), NA).to_string();

    lines.push(format!(
        "\n{} {} {} {} ({})",
        or(c.symbol.as_deref(), UNKNOWN),
        expiration,
        or(c.strike.as_deref(), NA),
        c.kind
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        or(c.contract_id.as_deref(), UNKNOWN)
    ));
    lines.push(format!("Last: {} | Mark: {}", na(&c.last), na(&c.mark)));
    lines.push(format!(
        "Bid: {} ({}) | Ask: {} ({})",
        na(&c.bid),
        na(&c.bid_size),
        na(&c.ask),
        na(&c.ask_size)
    ));
    lines.push(format!(
        "Volume: {} | Open Interest: {}",
        na(&c.volume),
        na(&c.open_interest)
    ));

    if chain == Chain::Historical || c.implied_volatility.is_some() {
        lines.push(format!(
            "IV: {} | Delta: {} | Gamma: {}",
            na(&c.implied_volatility),
            na(&c.delta),
            na(&c.gamma)
        ));
        lines.push(format!(
            "Theta: {} | Vega: {} | Rho: {}",
            na(&c.theta),
            na(&c.vega),
            na(&c.rho)
        ));
    }
}
