//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over financial data sources so the fetcher
//! can run against Yahoo Finance in production and an in-memory provider in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Fundamentals;

/// Raw daily bar from a data provider. Only the closing prices matter for growth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub close: f64,
    pub adj_close: f64,
}

impl RawBar {
    /// Price used for growth under the given field, `NaN` when unavailable.
    ///
    /// `Adjusted` falls back to the raw close when the adjusted value is missing.
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Close => self.close,
            PriceField::Adjusted => {
                if self.adj_close.is_finite() {
                    self.adj_close
                } else {
                    self.close
                }
            }
        }
    }
}

/// Which closing price feeds the growth calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Split- and dividend-adjusted close.
    #[default]
    Adjusted,
    /// Unadjusted close as printed on the day.
    Close,
}

/// Structured error types for data operations.
///
/// These are displayed verbatim in progress lines next to the ticker and period.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no '{item}' reported for {symbol}")]
    MissingLineItem { symbol: String, item: String },

    #[error("no price data for {symbol} between {start} and {end}")]
    NoPriceData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("constituents table '{0}' not found in page")]
    TableNotFound(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful history fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    InMemory,
}

/// Trait for financial data providers.
///
/// Calls are blocking; the pipeline drives one request at a time.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over `[start, end)`, sorted by date.
    ///
    /// An empty range is reported as `DataError::NoPriceData`.
    fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError>;

    /// Fetch the latest annual net income and revenue plus current market cap.
    ///
    /// Missing net income or revenue is an error; a missing market cap is not.
    fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64, adj_close: f64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            close,
            adj_close,
        }
    }

    #[test]
    fn adjusted_price_prefers_adj_close() {
        assert_eq!(bar(100.0, 95.0).price(PriceField::Adjusted), 95.0);
        assert_eq!(bar(100.0, 95.0).price(PriceField::Close), 100.0);
    }

    #[test]
    fn adjusted_price_falls_back_to_close() {
        assert_eq!(bar(100.0, f64::NAN).price(PriceField::Adjusted), 100.0);
    }

    #[test]
    fn errors_name_the_symbol() {
        let err = DataError::MissingLineItem {
            symbol: "BEP".into(),
            item: "Net Income".into(),
        };
        assert_eq!(err.to_string(), "no 'Net Income' reported for BEP");
    }
}
