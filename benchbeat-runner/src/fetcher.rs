//! Per-ticker fetch: fundamentals plus growth for every configured period.
//!
//! Failures are isolated. A fundamentals error blanks the three fundamentals
//! fields of that ticker only; a history error blanks one period only. Nothing
//! here aborts the batch.

use benchbeat_core::data::{DataError, DataProvider, PriceField};
use benchbeat_core::domain::{FinancialRecord, Fundamentals, Period, PeriodGrowth, PeriodSet};
use benchbeat_core::growth::{checked_growth_rate, endpoint_prices};
use tracing::{debug, warn};

use crate::progress::FetchProgress;

/// What happened when computing growth for one ticker and period.
#[derive(Debug)]
pub enum PeriodOutcome {
    Computed {
        start_price: f64,
        end_price: f64,
        growth_pct: f64,
    },
    /// The provider had no prices inside the period.
    NoData,
    /// Zero or negative first price; growth is undefined.
    UnusableStartPrice { start_price: f64 },
    Failed(DataError),
}

impl PeriodOutcome {
    pub fn growth_pct(&self) -> Option<f64> {
        match self {
            PeriodOutcome::Computed { growth_pct, .. } => Some(*growth_pct),
            _ => None,
        }
    }
}

/// Counts gathered over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub tickers: usize,
    pub fundamentals_failed: usize,
    pub missing_periods: usize,
}

/// Records for every ticker, in input order.
#[derive(Debug, Clone)]
pub struct FetchOutput {
    pub records: Vec<FinancialRecord>,
    pub summary: FetchSummary,
}

/// Compute growth for one period from the provider's bars.
pub fn fetch_period(
    provider: &dyn DataProvider,
    ticker: &str,
    period: &Period,
    price_field: PriceField,
) -> PeriodOutcome {
    match provider.fetch_history(ticker, period.start, period.end) {
        Ok(result) => match endpoint_prices(&result.bars, price_field) {
            None => PeriodOutcome::NoData,
            Some((start_price, end_price)) => match checked_growth_rate(start_price, end_price) {
                Some(growth_pct) => PeriodOutcome::Computed {
                    start_price,
                    end_price,
                    growth_pct,
                },
                None => PeriodOutcome::UnusableStartPrice { start_price },
            },
        },
        Err(DataError::NoPriceData { .. }) => PeriodOutcome::NoData,
        Err(e) => PeriodOutcome::Failed(e),
    }
}

/// Fetch everything for one ticker. The flag is false when fundamentals failed.
fn fetch_ticker(
    provider: &dyn DataProvider,
    ticker: &str,
    periods: &PeriodSet,
    price_field: PriceField,
    progress: &dyn FetchProgress,
) -> (FinancialRecord, bool) {
    let fundamentals_result = provider.fetch_fundamentals(ticker);
    progress.on_fundamentals(ticker, &fundamentals_result);

    let (fundamentals, fundamentals_ok) = match fundamentals_result {
        Ok(f) => (f, true),
        Err(e) => {
            warn!(ticker, error = %e, "fundamentals unavailable");
            (Fundamentals::missing(), false)
        }
    };

    let growth = periods
        .iter()
        .map(|(window, period)| {
            let outcome = fetch_period(provider, ticker, period, price_field);
            progress.on_period(ticker, period, &outcome);

            match &outcome {
                PeriodOutcome::Computed { growth_pct, .. } => {
                    debug!(ticker, period = %period.label, growth_pct, "period growth");
                }
                PeriodOutcome::Failed(e) => {
                    warn!(ticker, period = %period.label, error = %e, "price history unavailable");
                }
                PeriodOutcome::NoData | PeriodOutcome::UnusableStartPrice { .. } => {
                    debug!(ticker, period = %period.label, "growth missing");
                }
            }

            PeriodGrowth {
                label: period.label.clone(),
                window,
                growth_pct: outcome.growth_pct(),
            }
        })
        .collect();

    let record = FinancialRecord {
        ticker: ticker.to_string(),
        fundamentals,
        growth,
    };
    (record, fundamentals_ok)
}

/// Fetch a single ticker's record.
pub fn fetch_record(
    provider: &dyn DataProvider,
    ticker: &str,
    periods: &PeriodSet,
    price_field: PriceField,
    progress: &dyn FetchProgress,
) -> FinancialRecord {
    fetch_ticker(provider, ticker, periods, price_field, progress).0
}

/// Fetch all tickers sequentially, folding the records into a list in ticker order.
pub fn fetch_all(
    provider: &dyn DataProvider,
    tickers: &[String],
    periods: &PeriodSet,
    price_field: PriceField,
    progress: &dyn FetchProgress,
) -> FetchOutput {
    let total = tickers.len();
    let init = (
        Vec::with_capacity(total),
        FetchSummary {
            tickers: total,
            ..FetchSummary::default()
        },
    );

    let (records, summary) =
        tickers
            .iter()
            .enumerate()
            .fold(init, |(mut records, mut summary), (i, ticker)| {
                progress.on_ticker_start(ticker, i, total);
                let (record, fundamentals_ok) =
                    fetch_ticker(provider, ticker, periods, price_field, progress);
                if !fundamentals_ok {
                    summary.fundamentals_failed += 1;
                }
                summary.missing_periods += record.missing_periods();
                records.push(record);
                (records, summary)
            });

    progress.on_batch_complete(&summary);
    FetchOutput { records, summary }
}
