//! Universe sources: where the list of tickers to screen comes from.
//!
//! A static list is stored inline in the screen config or in its own TOML
//! file (`tickers = [...]`). The S&P 500 constituents scrape lives in
//! [`super::constituents`]. Either way the benchmarks are moved to the front
//! before fetching.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::provider::DataError;

/// Anything that can produce the ordered list of tickers for a run.
pub trait TickerSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Load the tickers. Failure here is fatal for the run.
    fn load(&self) -> Result<Vec<String>, DataError>;
}

/// A literal ticker list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaticUniverse {
    pub tickers: Vec<String>,
}

impl StaticUniverse {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a ticker list from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read universe file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a ticker list from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse universe TOML: {e}"))
    }
}

impl TickerSource for StaticUniverse {
    fn name(&self) -> &str {
        "static"
    }

    fn load(&self) -> Result<Vec<String>, DataError> {
        Ok(self.tickers.clone())
    }
}

/// Put `benchmarks` first (in the given order), then the remaining tickers in
/// source order. Blank symbols and repeats are dropped; the first occurrence wins.
pub fn with_benchmarks_first(tickers: Vec<String>, benchmarks: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    benchmarks
        .iter()
        .map(|b| b.to_string())
        .chain(tickers)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmarks_go_first() {
        let tickers = vec!["AAPL".to_string(), "MSFT".into(), "SPY".into()];
        let out = with_benchmarks_first(tickers, &["SPY", "QQQ"]);
        assert_eq!(out, vec!["SPY", "QQQ", "AAPL", "MSFT"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let tickers = vec![
            "QQQ".to_string(),
            "GOOGL".into(),
            "AMZN".into(),
            "GOOGL".into(),
            " NVDA ".into(),
            "".into(),
        ];
        let out = with_benchmarks_first(tickers, &["SPY", "QQQ"]);
        assert_eq!(out, vec!["SPY", "QQQ", "GOOGL", "AMZN", "NVDA"]);
    }

    #[test]
    fn ticker_list_toml_parses() {
        let toml_str = r#"tickers = ["FICO", "AXON", "KLAC"]"#;
        let parsed = StaticUniverse::from_toml(toml_str).unwrap();
        assert_eq!(parsed, StaticUniverse::new(["FICO", "AXON", "KLAC"]));
    }

    #[test]
    fn static_source_loads_in_order() {
        let u = StaticUniverse::new(["MPWR", "CTAS"]);
        assert_eq!(u.load().unwrap(), vec!["MPWR", "CTAS"]);
        assert_eq!(u.name(), "static");
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = StaticUniverse::from_toml("tickers = 5").unwrap_err();
        assert!(err.starts_with("parse universe TOML"));
    }
}
