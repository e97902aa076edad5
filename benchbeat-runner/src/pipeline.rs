//! Screen orchestration: universe, fetch, filter.

use benchbeat_core::data::{with_benchmarks_first, DataError, DataProvider, TickerSource};
use benchbeat_core::domain::{FinancialRecord, PeriodSet};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, ScreenConfig};
use crate::fetcher::{fetch_all, FetchSummary};
use crate::outperform::{find_outperformers, Outperformers};
use crate::progress::FetchProgress;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("failed to load ticker universe from {source_name}: {error}")]
    Universe {
        source_name: String,
        #[source]
        error: DataError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("benchmark {0} missing from fetched records")]
    MissingBenchmark(String),
}

/// Everything a run produced, ready for export.
#[derive(Debug, Clone)]
pub struct ScreenResult {
    /// One record per ticker, benchmarks first.
    pub records: Vec<FinancialRecord>,
    pub periods: PeriodSet,
    pub broad_market: Outperformers,
    pub technology: Outperformers,
    pub summary: FetchSummary,
}

/// Load the universe with the benchmarks placed first.
pub fn resolve_universe(
    config: &ScreenConfig,
    source: &dyn TickerSource,
) -> Result<Vec<String>, ScreenError> {
    let tickers = source.load().map_err(|error| ScreenError::Universe {
        source_name: source.name().to_string(),
        error,
    })?;
    let universe = with_benchmarks_first(tickers, &config.benchmarks.symbols());
    info!(source = source.name(), tickers = universe.len(), "universe resolved");
    Ok(universe)
}

fn outperformers_of(
    records: &[FinancialRecord],
    benchmark: &str,
    periods: &PeriodSet,
) -> Result<Outperformers, ScreenError> {
    let bench = records
        .iter()
        .find(|r| r.ticker == benchmark)
        .ok_or_else(|| ScreenError::MissingBenchmark(benchmark.to_string()))?;
    let tickers = find_outperformers(records, bench, periods.comparison());
    info!(benchmark, count = tickers.len(), "outperformers found");
    Ok(Outperformers {
        benchmark: benchmark.to_string(),
        tickers,
    })
}

/// Run a full screen. Only a universe failure or an invalid config aborts;
/// per-ticker failures end up as missing values in the records.
pub fn run_screen(
    config: &ScreenConfig,
    source: &dyn TickerSource,
    provider: &dyn DataProvider,
    progress: &dyn FetchProgress,
) -> Result<ScreenResult, ScreenError> {
    config.validate()?;

    let universe = resolve_universe(config, source)?;
    let fetched = fetch_all(
        provider,
        &universe,
        &config.periods,
        config.provider.price_field,
        progress,
    );

    let broad_market = outperformers_of(
        &fetched.records,
        &config.benchmarks.broad_market,
        &config.periods,
    )?;
    let technology = outperformers_of(
        &fetched.records,
        &config.benchmarks.technology,
        &config.periods,
    )?;

    Ok(ScreenResult {
        records: fetched.records,
        periods: config.periods.clone(),
        broad_market,
        technology,
        summary: fetched.summary,
    })
}
