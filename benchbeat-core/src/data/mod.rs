//! Data sources: ticker universes and the financial data provider

pub mod constituents;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use constituents::{parse_constituents, Sp500Constituents, SP500_TABLE_ID, SP500_URL};
pub use provider::{DataError, DataProvider, DataSource, FetchResult, PriceField, RawBar};
pub use universe::{with_benchmarks_first, StaticUniverse, TickerSource};
pub use yahoo::{YahooProvider, YahooSettings};
