//! CSV export of a screen run.
//!
//! Three files are written: the full formatted table for every ticker and one
//! single-column ticker list per benchmark. All cells are rendered through the
//! shared formatters so missing values appear as `N/A`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchbeat_core::domain::{FinancialRecord, PeriodSet};
use tracing::info;

use crate::config::OutputConfig;
use crate::pipeline::ScreenResult;

/// One file written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
    /// BLAKE3 hex digest of the file contents.
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub full_table: ExportedFile,
    pub broad_market: ExportedFile,
    pub technology: ExportedFile,
}

impl ExportSummary {
    pub fn files(&self) -> [&ExportedFile; 3] {
        [&self.full_table, &self.broad_market, &self.technology]
    }
}

/// Full table: ticker, fundamentals, then one column per period label.
///
/// Columns: Ticker, Latest Revenue, Latest Earnings, Market Cap, <five-year labels>,
/// followed by the ten-year labels when `include_ten_year` is set.
pub fn full_table_csv(
    records: &[FinancialRecord],
    periods: &PeriodSet,
    include_ten_year: bool,
) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let labels: Vec<&str> = periods
        .five_year
        .iter()
        .chain(periods.ten_year.iter().filter(|_| include_ten_year))
        .map(|p| p.label.as_str())
        .collect();

    let header = ["Ticker", "Latest Revenue", "Latest Earnings", "Market Cap"]
        .into_iter()
        .chain(labels.iter().copied());
    wtr.write_record(header)?;

    for r in records {
        let row = [
            r.ticker.clone(),
            r.formatted_revenue(),
            r.formatted_earnings(),
            r.formatted_market_cap(),
        ]
        .into_iter()
        .chain(labels.iter().map(|label| r.formatted_growth(label)));
        wtr.write_record(row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Single `Ticker` column.
pub fn ticker_list_csv(tickers: &[String]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["Ticker"])?;
    for t in tickers {
        wtr.write_record([t])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn write_file(path: &Path, contents: &str, rows: usize) -> Result<ExportedFile> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    let digest = blake3::hash(contents.as_bytes()).to_hex().to_string();
    info!(path = %path.display(), rows, %digest, "wrote output");
    Ok(ExportedFile {
        path: path.to_path_buf(),
        rows,
        digest,
    })
}

/// Write all three outputs under `output.dir`, creating it if needed.
pub fn write_outputs(result: &ScreenResult, output: &OutputConfig) -> Result<ExportSummary> {
    std::fs::create_dir_all(&output.dir)
        .with_context(|| format!("failed to create output dir: {}", output.dir.display()))?;

    let table = full_table_csv(&result.records, &result.periods, output.include_ten_year)?;
    let full_table = write_file(&output.full_table_path(), &table, result.records.len())?;

    let broad = &result.broad_market.tickers;
    let broad_market = write_file(
        &output.broad_market_path(),
        &ticker_list_csv(broad)?,
        broad.len(),
    )?;

    let tech = &result.technology.tickers;
    let technology = write_file(&output.technology_path(), &ticker_list_csv(tech)?, tech.len())?;

    Ok(ExportSummary {
        full_table,
        broad_market,
        technology,
    })
}
