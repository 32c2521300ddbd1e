//! Query-string builder for `GET /query` calls.

use std::fmt::{self, Display};

/// An ordered set of query parameters, always led by `function`.
///
/// The API key is appended by the transport and never stored here, so a
/// `Query` is always safe to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            pairs: vec![("function".to_string(), function.into())],
        }
    }

    /// Append a parameter. A repeated key replaces the earlier value in place.
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Append a parameter only when a value is present.
    pub fn opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Append a string parameter only when it is present and non-blank.
    pub fn opt_str(self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.opt(key, value.map(str::trim).filter(|v| !v.is_empty()))
    }

    pub fn function(&self) -> &str {
        &self.pairs[0].1
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_skips_missing() {
        let q = Query::new("TIME_SERIES_INTRADAY")
            .param("symbol", "IBM")
            .param("interval", "5min")
            .opt("adjusted", Some(false))
            .opt::<u32>("time_period", None)
            .opt_str("month", Some("  "));

        assert_eq!(q.function(), "TIME_SERIES_INTRADAY");
        assert_eq!(
            q.to_string(),
            "function=TIME_SERIES_INTRADAY&symbol=IBM&interval=5min&adjusted=false"
        );
    }

    #[test]
    fn repeated_key_overwrites() {
        let q = Query::new("SMA").param("interval", "daily").param("interval", "weekly");
        assert_eq!(q.get("interval"), Some("weekly"));
        assert_eq!(q.pairs().len(), 2);
    }

    #[test]
    fn floats_render_without_trailing_zeros() {
        let q = Query::new("SAR").opt("acceleration", Some(0.02_f64)).opt("maximum", Some(0.2_f64));
        assert_eq!(q.get("acceleration"), Some("0.02"));
        assert_eq!(q.get("maximum"), Some("0.2"));
    }
}
