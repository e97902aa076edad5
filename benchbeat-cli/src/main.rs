//! Benchbeat CLI: screen tickers against the SPY and QQQ benchmarks.
//!
//! Commands:
//! - `run`: fetch fundamentals and period growth, filter outperformers, write CSVs
//! - `tickers`: print the resolved ticker universe (benchmarks first)
//! - `init-config`: write the default configuration to a file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use benchbeat_core::data::{YahooProvider, SP500_URL};
use benchbeat_core::domain::{FinancialRecord, Period};
use benchbeat_runner::{
    resolve_universe, run_screen, write_outputs, ExportSummary, FetchProgress, ScreenConfig,
    ScreenResult, SilentProgress, StdoutProgress, UniverseConfig, DEFAULT_CONFIG_TOML,
};

#[derive(Parser)]
#[command(
    name = "benchbeat",
    about = "Benchbeat CLI: find tickers that beat SPY and QQQ in every five-year period"
)]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the screen and write the three CSV files.
    Run {
        /// Path to a TOML config file. Defaults to the built-in configuration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory, overriding `[output] dir`.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Use the current S&P 500 constituents instead of the configured universe.
        #[arg(long, default_value_t = false)]
        sp500: bool,

        /// Suppress per-ticker progress lines.
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
    /// Print the resolved ticker universe, benchmarks first.
    Tickers {
        /// Path to a TOML config file. Defaults to the built-in configuration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Use the current S&P 500 constituents instead of the configured universe.
        #[arg(long, default_value_t = false)]
        sp500: bool,
    },
    /// Write the default configuration file.
    InitConfig {
        #[arg(long, default_value = "benchbeat.toml")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            output_dir,
            sp500,
            quiet,
        } => run_screen_cmd(config, output_dir, sp500, quiet),
        Commands::Tickers { config, sp500 } => run_tickers(config, sp500),
        Commands::InitConfig { path, force } => run_init_config(&path, force),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>, sp500: bool) -> Result<ScreenConfig> {
    let mut config = match path {
        Some(p) => ScreenConfig::from_file(&p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => ScreenConfig::builtin().context("built-in config is invalid")?,
    };
    if sp500 {
        config.universe = UniverseConfig::Sp500 {
            url: SP500_URL.to_string(),
        };
    }
    Ok(config)
}

fn run_screen_cmd(
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    sp500: bool,
    quiet: bool,
) -> Result<()> {
    let started = Instant::now();

    let mut config = load_config(config_path, sp500)?;
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }

    let source = config.ticker_source()?;
    let provider = YahooProvider::new(&config.yahoo_settings())?;
    let progress: &dyn FetchProgress = if quiet {
        &SilentProgress
    } else {
        &StdoutProgress
    };

    info!(universe = source.name(), periods = config.periods.period_count(), "starting screen");
    let result = run_screen(&config, source.as_ref(), &provider, progress)?;

    print_summary(&result);

    let export = write_outputs(&result, &config.output)?;
    print_export(&export);

    println!("\nCompleted in {:.1}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn run_tickers(config_path: Option<PathBuf>, sp500: bool) -> Result<()> {
    let config = load_config(config_path, sp500)?;
    let source = config.ticker_source()?;
    let universe = resolve_universe(&config, source.as_ref())?;

    for ticker in &universe {
        println!("{ticker}");
    }
    eprintln!("{} tickers from {}", universe.len(), source.name());
    Ok(())
}

fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn print_growth_table(title: &str, records: &[FinancialRecord], periods: &[Period]) {
    if periods.is_empty() {
        return;
    }
    println!();
    println!("=== {title} ===");
    let header: String = periods
        .iter()
        .map(|p| format!("{:>12}", p.label))
        .collect();
    println!("{:<8}{header}", "Ticker");
    for r in records {
        let row: String = periods
            .iter()
            .map(|p| format!("{:>12}", r.formatted_growth(&p.label)))
            .collect();
        println!("{:<8}{row}", r.ticker);
    }
}

fn print_summary(result: &ScreenResult) {
    print_growth_table(
        "Five-Year Growth",
        &result.records,
        &result.periods.five_year,
    );
    print_growth_table("Ten-Year Growth", &result.records, &result.periods.ten_year);

    println!();
    println!("--- Fetch ---");
    println!("Tickers:               {}", result.summary.tickers);
    println!("Without fundamentals:  {}", result.summary.fundamentals_failed);
    println!("Missing period values: {}", result.summary.missing_periods);

    for group in [&result.broad_market, &result.technology] {
        println!();
        println!(
            "Stocks that beat {} in every five-year period ({}):",
            group.benchmark,
            group.tickers.len()
        );
        if group.tickers.is_empty() {
            println!("  (none)");
        } else {
            println!("  {}", group.tickers.join(", "));
        }
    }
}

fn print_export(export: &ExportSummary) {
    println!();
    println!("--- Output ---");
    for file in export.files() {
        println!(
            "{} ({} rows, blake3 {})",
            file.path.display(),
            file.rows,
            &file.digest[..16]
        );
    }
}
