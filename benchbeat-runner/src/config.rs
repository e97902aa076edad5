//! Screen configuration loaded from TOML.
//!
//! Everything the original screen hard-coded lives here: benchmark symbols,
//! the ticker universe, period windows, provider settings and output paths.
//! The built-in default reproduces the original run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use benchbeat_core::data::{
    PriceField, Sp500Constituents, StaticUniverse, TickerSource, YahooSettings, SP500_URL,
};
use benchbeat_core::domain::{PeriodError, PeriodSet};

/// The default configuration, verbatim (comments included).
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid periods: {0}")]
    Period(#[from] PeriodError),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("universe unavailable: {0}")]
    Universe(String),
}

/// Complete configuration for one screen run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenConfig {
    pub benchmarks: Benchmarks,
    pub universe: UniverseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    pub periods: PeriodSet,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The two reference instruments every ticker is measured against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Benchmarks {
    /// Broad-market index fund (S&P 500 tracker).
    pub broad_market: String,
    /// Technology index fund (Nasdaq-100 tracker).
    pub technology: String,
}

impl Benchmarks {
    pub fn symbols(&self) -> [&str; 2] {
        [self.broad_market.as_str(), self.technology.as_str()]
    }
}

/// Where the ticker universe comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum UniverseConfig {
    /// Inline list.
    Static { tickers: Vec<String> },
    /// Separate TOML file with `tickers = [...]`, relative to the config file.
    File { path: PathBuf },
    /// Scrape of the public S&P 500 constituents table.
    Sp500 {
        #[serde(default = "default_sp500_url")]
        url: String,
    },
}

fn default_sp500_url() -> String {
    SP500_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub price_field: PriceField,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let settings = YahooSettings::default();
        Self {
            price_field: PriceField::Adjusted,
            timeout_secs: settings.timeout.as_secs(),
            user_agent: settings.user_agent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub full_table: String,
    pub broad_market_outperformers: String,
    pub technology_outperformers: String,
    /// Append ten-year growth columns to the full table.
    pub include_ten_year: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
            full_table: "stock_tickers_data.csv".into(),
            broad_market_outperformers: "snp500_outperformers.csv".into(),
            technology_outperformers: "qqq_outperformers.csv".into(),
            include_ten_year: false,
        }
    }
}

impl OutputConfig {
    pub fn full_table_path(&self) -> PathBuf {
        self.dir.join(&self.full_table)
    }

    pub fn broad_market_path(&self) -> PathBuf {
        self.dir.join(&self.broad_market_outperformers)
    }

    pub fn technology_path(&self) -> PathBuf {
        self.dir.join(&self.technology_outperformers)
    }
}

impl ScreenConfig {
    /// The built-in configuration (original tickers and periods).
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG_TOML)
    }

    /// Load and validate a config file. `file` universes resolve against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        if let UniverseConfig::File { path: list } = &mut config.universe {
            if list.is_relative() {
                if let Some(base) = path.parent() {
                    *list = base.join(&*list);
                }
            }
        }

        Ok(config)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [broad, tech] = self.benchmarks.symbols();
        if broad.trim().is_empty() || tech.trim().is_empty() {
            return Err(ConfigError::Invalid("benchmark symbols must not be empty".into()));
        }
        for symbol in [broad, tech] {
            if symbol != symbol.trim() {
                return Err(ConfigError::Invalid(format!(
                    "benchmark symbol '{symbol}' has surrounding whitespace"
                )));
            }
        }
        if broad == tech {
            return Err(ConfigError::Invalid(format!(
                "benchmarks must differ (both are '{broad}')"
            )));
        }

        self.periods.validate()?;

        let out = &self.output;
        for name in [
            &out.full_table,
            &out.broad_market_outperformers,
            &out.technology_outperformers,
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("output file names must not be empty".into()));
            }
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs must be > 0".into()));
        }

        Ok(())
    }

    pub fn yahoo_settings(&self) -> YahooSettings {
        YahooSettings {
            timeout: Duration::from_secs(self.provider.timeout_secs),
            user_agent: self.provider.user_agent.clone(),
        }
    }

    /// Build the ticker source this config names.
    pub fn ticker_source(&self) -> Result<Box<dyn TickerSource>, ConfigError> {
        match &self.universe {
            UniverseConfig::Static { tickers } => {
                Ok(Box::new(StaticUniverse::new(tickers.iter().cloned())))
            }
            UniverseConfig::File { path } => StaticUniverse::from_file(path)
                .map(|u| Box::new(u) as Box<dyn TickerSource>)
                .map_err(ConfigError::Universe),
            UniverseConfig::Sp500 { url } => {
                let timeout = Duration::from_secs(self.provider.timeout_secs);
                Sp500Constituents::new(url.clone(), timeout)
                    .map(|s| Box::new(s) as Box<dyn TickerSource>)
                    .map_err(|e| ConfigError::Universe(e.to_string()))
            }
        }
    }
}
