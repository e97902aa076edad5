//! Progress reporting for the per-ticker fetch loop.
//!
//! Progress lines are diagnostic console output, not part of the data contract.

use benchbeat_core::data::DataError;
use benchbeat_core::domain::{Fundamentals, Period};
use benchbeat_core::format::{format_currency, format_percentage};

use crate::fetcher::{FetchSummary, PeriodOutcome};

/// Progress callbacks for a screen run.
pub trait FetchProgress {
    /// Called when starting to fetch a ticker.
    fn on_ticker_start(&self, ticker: &str, index: usize, total: usize);

    /// Called once the fundamentals request for a ticker finished.
    fn on_fundamentals(&self, ticker: &str, result: &Result<Fundamentals, DataError>);

    /// Called after each period of a ticker, success or not.
    fn on_period(&self, ticker: &str, period: &Period, outcome: &PeriodOutcome);

    /// Called when every ticker has been processed.
    fn on_batch_complete(&self, summary: &FetchSummary);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_ticker_start(&self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {ticker}...", index + 1, total);
    }

    fn on_fundamentals(&self, ticker: &str, result: &Result<Fundamentals, DataError>) {
        match result {
            Ok(f) => println!(
                "  Fetched financial data for {ticker}: Earnings={}, Market Cap={}, Revenue={}",
                format_currency(f.net_income),
                format_currency(f.market_cap),
                format_currency(f.total_revenue),
            ),
            Err(e) => println!("  Error fetching earnings/market cap/revenue for {ticker}: {e}"),
        }
    }

    fn on_period(&self, ticker: &str, period: &Period, outcome: &PeriodOutcome) {
        let label = &period.label;
        match outcome {
            PeriodOutcome::Computed {
                start_price,
                end_price,
                growth_pct,
            } => println!(
                "  {ticker} - {label}: Start Price = {start_price:.4}, End Price = {end_price:.4}, Growth = {}",
                format_percentage(Some(*growth_pct))
            ),
            PeriodOutcome::NoData => println!("  No data found for {ticker} in period {label}."),
            PeriodOutcome::UnusableStartPrice { start_price } => println!(
                "  Unusable start price {start_price} for {ticker} in period {label}; growth left missing."
            ),
            PeriodOutcome::Failed(e) => {
                println!("  Error fetching data for {ticker} in period {label}: {e}")
            }
        }
    }

    fn on_batch_complete(&self, summary: &FetchSummary) {
        println!(
            "\nFetch complete: {} tickers, {} without fundamentals, {} missing period values",
            summary.tickers, summary.fundamentals_failed, summary.missing_periods
        );
    }
}

/// Reporter that discards everything. Useful for tests and `--quiet`.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_ticker_start(&self, _ticker: &str, _index: usize, _total: usize) {}

    fn on_fundamentals(&self, _ticker: &str, _result: &Result<Fundamentals, DataError>) {}

    fn on_period(&self, _ticker: &str, _period: &Period, _outcome: &PeriodOutcome) {}

    fn on_batch_complete(&self, _summary: &FetchSummary) {}
}
