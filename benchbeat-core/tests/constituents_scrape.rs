//! Integration tests for the S&P 500 constituents scrape against a frozen page.

use std::path::PathBuf;
use benchbeat_core::data::{parse_constituents, with_benchmarks_first, DataError, SP500_TABLE_ID};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn frozen_page_yields_first_column_symbols() {
    let html = fixture("sp500_constituents.html");
    let tickers = parse_constituents(&html, SP500_TABLE_ID).unwrap();
    assert_eq!(tickers, vec!["MMM", "AOS", "BRK.B", "AXON"]);
}

#[test]
fn other_tables_on_the_page_are_ignored() {
    let html = fixture("sp500_constituents.html");
    let tickers = parse_constituents(&html, SP500_TABLE_ID).unwrap();
    assert!(!tickers.iter().any(|t| t == "2024-09-23" || t == "PLTR"));
}

#[test]
fn symbols_are_not_rewritten() {
    // Yahoo spells it BRK-B; no normalisation happens at the source.
    let html = fixture("sp500_constituents.html");
    let tickers = parse_constituents(&html, SP500_TABLE_ID).unwrap();
    assert!(tickers.contains(&"BRK.B".to_string()));
}

#[test]
fn scraped_universe_gets_benchmarks_first() {
    let html = fixture("sp500_constituents.html");
    let tickers = parse_constituents(&html, SP500_TABLE_ID).unwrap();
    let universe = with_benchmarks_first(tickers, &["SPY", "QQQ"]);
    assert_eq!(&universe[..3], &["SPY", "QQQ", "MMM"]);
    assert_eq!(universe.len(), 6);
}

#[test]
fn page_without_table_fails_loudly() {
    let result = parse_constituents("<html><body><p>maintenance</p></body></html>", SP500_TABLE_ID);
    match result {
        Err(DataError::TableNotFound(id)) => assert_eq!(id, "constituents"),
        other => panic!("expected TableNotFound, got: {other:?}"),
    }
}
