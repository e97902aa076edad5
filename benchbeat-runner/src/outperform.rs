//! Outperformance filter.

use benchbeat_core::domain::{FinancialRecord, Period};

/// Tickers that beat one benchmark in every comparison period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outperformers {
    pub benchmark: String,
    pub tickers: Vec<String>,
}

/// True when `record` beats `benchmark` strictly in every period.
///
/// A missing value on either side for any period disqualifies.
pub fn beats_in_every_period(
    record: &FinancialRecord,
    benchmark: &FinancialRecord,
    comparison: &[Period],
) -> bool {
    comparison.iter().all(|period| {
        match (
            record.growth_for(&period.label),
            benchmark.growth_for(&period.label),
        ) {
            (Some(ticker), Some(bench)) => ticker > bench,
            _ => false,
        }
    })
}

/// Tickers (in record order) that beat the benchmark in every comparison period.
pub fn find_outperformers(
    records: &[FinancialRecord],
    benchmark: &FinancialRecord,
    comparison: &[Period],
) -> Vec<String> {
    records
        .iter()
        .filter(|r| beats_in_every_period(r, benchmark, comparison))
        .map(|r| r.ticker.clone())
        .collect()
}
