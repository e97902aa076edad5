//! Benchbeat Runner: configuration, fetch loop, outperformance filter, CSV export.
//!
//! This crate builds on `benchbeat-core` to provide:
//! - TOML screen configuration with a built-in default
//! - Sequential per-ticker fetch with per-ticker and per-period isolation
//! - The strict every-period outperformance filter
//! - Deterministic CSV export with BLAKE3 digests

pub mod config;
pub mod export;
pub mod fetcher;
pub mod outperform;
pub mod pipeline;
pub mod progress;

pub use config::{
    Benchmarks, ConfigError, OutputConfig, ProviderConfig, ScreenConfig, UniverseConfig,
    DEFAULT_CONFIG_TOML,
};
pub use export::{full_table_csv, ticker_list_csv, write_outputs, ExportSummary, ExportedFile};
pub use fetcher::{fetch_all, fetch_period, fetch_record, FetchOutput, FetchSummary, PeriodOutcome};
pub use outperform::{beats_in_every_period, find_outperformers, Outperformers};
pub use pipeline::{resolve_universe, run_screen, ScreenError, ScreenResult};
pub use progress::{FetchProgress, SilentProgress, StdoutProgress};
