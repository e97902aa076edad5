//! benchbeat core: domain types, growth math, formatting and data sources.
//!
//! This crate contains everything that does not depend on run configuration:
//! - Domain types (periods, fundamentals, per-ticker financial records)
//! - Growth calculation between the endpoint closes of a period
//! - Currency and percentage formatting with an explicit `N/A` sentinel
//! - Ticker sources (static list, S&P 500 constituents scrape)
//! - The `DataProvider` trait and its Yahoo Finance implementation

pub mod data;
pub mod domain;
pub mod format;
pub mod growth;
