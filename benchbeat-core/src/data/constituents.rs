//! S&P 500 constituents scraped from Wikipedia.
//!
//! The symbol is the first cell of every body row of the `constituents` table.
//! Symbols are taken verbatim; a malformed or delisted one fails later, at fetch time.

use scraper::{Html, Selector};
use std::time::Duration;
use tracing::info;

use super::provider::DataError;
use super::universe::TickerSource;

pub const SP500_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";
pub const SP500_TABLE_ID: &str = "constituents";

/// Ticker source backed by the public constituents page.
pub struct Sp500Constituents {
    client: reqwest::blocking::Client,
    url: String,
    table_id: String,
}

impl Sp500Constituents {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("benchbeat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            table_id: SP500_TABLE_ID.to_string(),
        })
    }

    fn fetch_page(&self) -> Result<String, DataError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {}", self.url)));
        }

        resp.text()
            .map_err(|e| DataError::ResponseFormatChanged(format!("unreadable page body: {e}")))
    }
}

impl TickerSource for Sp500Constituents {
    fn name(&self) -> &str {
        "sp500"
    }

    fn load(&self) -> Result<Vec<String>, DataError> {
        let html = self.fetch_page()?;
        let tickers = parse_constituents(&html, &self.table_id)?;
        info!(count = tickers.len(), url = %self.url, "scraped constituents");
        Ok(tickers)
    }
}

/// Extract the first-column text of each non-header row of the table with `table_id`.
pub fn parse_constituents(html: &str, table_id: &str) -> Result<Vec<String>, DataError> {
    let document = Html::parse_document(html);
    let table_sel = selector(&format!("table#{table_id}"))?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| DataError::TableNotFound(table_id.to_string()))?;

    let tickers = table
        .select(&row_sel)
        .skip(1)
        .filter_map(|row| row.select(&cell_sel).next())
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();

    Ok(tickers)
}

fn selector(css: &str) -> Result<Selector, DataError> {
    Selector::parse(css)
        .map_err(|e| DataError::Other(format!("invalid CSS selector '{css}': {e:?}")))
}
