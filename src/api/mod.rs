//! Wire types for Alpha Vantage responses and the enums that select
//! provider functions.
//!
//! Every response field is optional: the provider omits keys freely and
//! answers with an empty object for unknown symbols.

pub mod crypto;
pub mod fundamental;
pub mod intelligence;
pub mod economy;
pub mod option_chain;
pub mod series;
pub mod stocks;
pub mod technical;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use serde_with::DeserializeAs;

/// Declare a string enum whose variants map one-to-one onto provider values.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, schemars::JsonSchema,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;

/// Informational envelope the provider returns in place of data when a
/// request is rate-limited, premium-only or malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notice {
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
}

impl Notice {
    /// The display text for this notice, if it carries one.
    pub fn message(&self) -> Option<String> {
        let present = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

        present(&self.information)
            .or_else(|| present(&self.error_message))
            .map(|text| format!("Error: {}", text))
            .or_else(|| present(&self.note).map(|text| format!("Note: {}", text)))
    }
}

/// An object whose keys carry an ordinal prefix, such as `"2. Symbol"`,
/// `"1: Symbol"` or `"1a. open (USD)"`. Lookups ignore the prefix.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Labeled(pub Map<String, Value>);

impl Labeled {
    /// Value for `label`, rendered as text. Numbers are accepted as well as
    /// strings; empty strings count as missing.
    pub fn get(&self, label: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(key, _)| strip_ordinal(key) == label)
            .and_then(|(_, value)| text(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A scalar rendered as text. Empty strings, `null` and containers are
/// treated as missing.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `serde_as` adapter for text fields that the provider sometimes sends as
/// numbers or booleans. Decodes through [`text`], so empty strings and
/// `null` become `None` (or `""` for a plain `String`).
pub struct Lenient;

impl<'de> DeserializeAs<'de, Option<String>> for Lenient {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(&Value::deserialize(deserializer)?))
    }
}

impl<'de> DeserializeAs<'de, String> for Lenient {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = <Lenient as DeserializeAs<'de, Option<String>>>::deserialize_as(deserializer)?;
        Ok(value.unwrap_or_default())
    }
}

/// Drop a leading `"<ordinal>. "` or `"<ordinal>: "` from a provider key.
pub fn strip_ordinal(key: &str) -> &str {
    for sep in [". ", ": "] {
        if let Some((prefix, rest)) = key.split_once(sep) {
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
                return rest;
            }
        }
    }
    key
}

wire_enum! {
    /// Spacing between intraday bars.
    pub enum IntradayInterval {
        OneMin => "1min",
        FiveMin => "5min",
        FifteenMin => "15min",
        ThirtyMin => "30min",
        SixtyMin => "60min",
    }
}

wire_enum! {
    /// Amount of history returned by series endpoints.
    pub enum OutputSize {
        /// Latest 100 data points.
        Compact => "compact",
        /// Full-length history.
        Full => "full",
    }
}

wire_enum! {
    /// Response encoding.
    pub enum DataType {
        Json => "json",
        Csv => "csv",
    }
}
