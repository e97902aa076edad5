//! Yahoo Finance data provider.
//!
//! Daily closes come from the v8 chart API; annual net income, annual revenue
//! and trailing market cap come from the fundamentals-timeseries API. Both are
//! unauthenticated. Requests are issued once: a failed call is reported to the
//! caller, which records the value as missing.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use crate::domain::Fundamentals;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const CHART_BASE: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const TIMESERIES_BASE: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";
/// Earliest timestamp the timeseries API accepts (1985-08-23).
const TIMESERIES_EPOCH: i64 = 493_590_046;

const NET_INCOME: &str = "annualNetIncome";
const TOTAL_REVENUE: &str = "annualTotalRevenue";
const MARKET_CAP: &str = "trailingMarketCap";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// Fundamentals-timeseries API response.
#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesResult,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    result: Option<Vec<Series>>,
    error: Option<ApiError>,
}

/// One series per requested type; the values sit under a key named after the type.
#[derive(Debug, Deserialize)]
struct Series {
    meta: SeriesMeta,
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    #[serde(rename = "type", default)]
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    #[serde(rename = "asOfDate")]
    as_of_date: NaiveDate,
    #[serde(rename = "reportedValue")]
    reported_value: Option<ReportedValue>,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    raw: f64,
}

/// HTTP client settings for the provider.
#[derive(Debug, Clone)]
pub struct YahooSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for YahooSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
        }
    }
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new(settings: &YahooSettings) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol over `[start, end)`.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = midnight_utc(start);
        let end_ts = midnight_utc(end);
        format!(
            "{CHART_BASE}/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d\
             &includeAdjustedClose=true&events=div,split"
        )
    }

    /// Build the fundamentals-timeseries URL for a symbol up to `now_ts`.
    fn timeseries_url(symbol: &str, now_ts: i64) -> String {
        format!(
            "{TIMESERIES_BASE}/{symbol}?symbol={symbol}\
             &type={NET_INCOME},{TOTAL_REVENUE},{MARKET_CAP}\
             &period1={TIMESERIES_EPOCH}&period2={now_ts}"
        )
    }

    /// GET a URL and decode its JSON body, mapping HTTP failures to `DataError`.
    fn get_json<T: DeserializeOwned>(&self, url: &str, symbol: &str) -> Result<T, DataError> {
        debug!(symbol, url, "yahoo request");

        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DataError::AuthenticationRequired(
                "Yahoo Finance requires authentication".into(),
            ));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }

        resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })
    }

    /// Parse the chart API response into date-ordered RawBars.
    fn parse_chart(
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        resp: ChartResponse,
    ) -> Result<Vec<RawBar>, DataError> {
        let result = resp
            .chart
            .result
            .ok_or_else(|| api_error(symbol, resp.chart.error))?;

        let no_data = || DataError::NoPriceData {
            symbol: symbol.to_string(),
            start,
            end,
        };

        let data = result.into_iter().next().ok_or_else(no_data)?;
        // Ranges before listing come back with no timestamps at all.
        let timestamps = data.timestamp.ok_or_else(no_data)?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let close = quote.close.get(i).copied().flatten();
            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());

            // Non-trading days carry nulls
            if close.is_none() && adj_close.is_none() {
                continue;
            }

            bars.push(RawBar {
                date,
                close: close.unwrap_or(f64::NAN),
                adj_close: adj_close.unwrap_or(f64::NAN),
            });
        }

        if bars.is_empty() {
            return Err(no_data());
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    /// Pick the latest reported value of each series.
    fn parse_fundamentals(
        symbol: &str,
        resp: TimeseriesResponse,
    ) -> Result<Fundamentals, DataError> {
        let series = resp
            .timeseries
            .result
            .ok_or_else(|| api_error(symbol, resp.timeseries.error))?;

        let mut latest: HashMap<String, f64> = HashMap::new();
        for s in series {
            let Some(kind) = s.meta.kind.first() else {
                continue;
            };
            let Some(raw_points) = s.values.get(kind) else {
                continue;
            };
            let points: Vec<Option<SeriesPoint>> = serde_json::from_value(raw_points.clone())
                .map_err(|e| {
                    DataError::ResponseFormatChanged(format!("bad {kind} series for {symbol}: {e}"))
                })?;

            let newest = points
                .into_iter()
                .flatten()
                .filter_map(|p| p.reported_value.map(|v| (p.as_of_date, v.raw)))
                .max_by_key(|(date, _)| *date);

            if let Some((_, value)) = newest {
                latest.insert(kind.clone(), value);
            }
        }

        let required = |kind: &str, item: &str| {
            latest
                .get(kind)
                .copied()
                .ok_or_else(|| DataError::MissingLineItem {
                    symbol: symbol.to_string(),
                    item: item.to_string(),
                })
        };

        let net_income = required(NET_INCOME, "Net Income")?;
        let total_revenue = required(TOTAL_REVENUE, "Total Revenue")?;

        Ok(Fundamentals {
            total_revenue: Some(total_revenue),
            net_income: Some(net_income),
            market_cap: latest.get(MARKET_CAP).copied(),
        })
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let url = Self::chart_url(symbol, start, end);
        let chart: ChartResponse = self.get_json(&url, symbol)?;
        let bars = Self::parse_chart(symbol, start, end, chart)?;
        Ok(FetchResult {
            bars,
            source: DataSource::YahooFinance,
        })
    }

    fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError> {
        let url = Self::timeseries_url(symbol, chrono::Utc::now().timestamp());
        let resp: TimeseriesResponse = self.get_json(&url, symbol)?;
        Self::parse_fundamentals(symbol, resp)
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

fn api_error(symbol: &str, error: Option<ApiError>) -> DataError {
    match error {
        Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        },
        Some(err) => {
            DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
        }
        None => DataError::ResponseFormatChanged("empty result with no error".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn chart(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    fn timeseries(json: &str) -> TimeseriesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn chart_url_uses_exclusive_midnight_end() {
        let url = YahooProvider::chart_url("AAPL", d(2019, 1, 1), d(2024, 10, 22));
        assert!(url.starts_with("https://query2.finance.yahoo.com/v8/finance/chart/AAPL?"));
        assert!(url.contains("period1=1546300800"));
        assert!(url.contains("period2=1729555200"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn timeseries_url_requests_three_types() {
        let url = YahooProvider::timeseries_url("MSFT", 1_700_000_000);
        assert!(url.contains("type=annualNetIncome,annualTotalRevenue,trailingMarketCap"));
        assert!(url.contains("period2=1700000000"));
    }

    #[test]
    fn parses_chart_and_skips_null_days() {
        // 2019-01-02, 2019-01-03 (holiday nulls), 2019-01-04
        let resp = chart(
            r#"{"chart":{"result":[{"timestamp":[1546437600,1546524000,1546610400],
            "indicators":{"quote":[{"close":[39.48,null,37.06]}],
            "adjclose":[{"adjclose":[38.10,null,35.76]}]}}],"error":null}}"#,
        );
        let bars = YahooProvider::parse_chart("AAPL", d(2019, 1, 1), d(2019, 1, 5), resp).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, d(2019, 1, 2));
        assert_eq!(bars[0].close, 39.48);
        assert_eq!(bars[1].adj_close, 35.76);
    }

    #[test]
    fn chart_without_adjclose_keeps_close() {
        let resp = chart(
            r#"{"chart":{"result":[{"timestamp":[1546437600],
            "indicators":{"quote":[{"close":[39.48]}]}}],"error":null}}"#,
        );
        let bars = YahooProvider::parse_chart("X", d(2019, 1, 1), d(2019, 1, 5), resp).unwrap();
        assert_eq!(bars[0].close, 39.48);
        assert!(bars[0].adj_close.is_nan());
    }

    #[test]
    fn chart_without_timestamps_is_no_data() {
        let resp = chart(
            r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#,
        );
        let err = YahooProvider::parse_chart("AXON", d(1994, 1, 1), d(1999, 1, 1), resp)
            .unwrap_err();
        assert!(matches!(err, DataError::NoPriceData { ref symbol, .. } if symbol == "AXON"));
    }

    #[test]
    fn chart_not_found_maps_to_symbol_not_found() {
        let resp = chart(
            r#"{"chart":{"result":null,"error":{"code":"Not Found",
            "description":"No data found, symbol may be delisted"}}}"#,
        );
        let err = YahooProvider::parse_chart("ZZZZ", d(2019, 1, 1), d(2020, 1, 1), resp)
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn fundamentals_use_latest_reported_values() {
        let resp = timeseries(
            r#"{"timeseries":{"result":[
              {"meta":{"symbol":["AAPL"],"type":["annualNetIncome"]},"timestamp":[1601424000,1696032000],
               "annualNetIncome":[
                 {"asOfDate":"2020-09-30","periodType":"12M","reportedValue":{"raw":57411000000.0,"fmt":"57.41B"}},
                 {"asOfDate":"2023-09-30","periodType":"12M","reportedValue":{"raw":96995000000.0,"fmt":"97.00B"}}]},
              {"meta":{"symbol":["AAPL"],"type":["annualTotalRevenue"]},"timestamp":[1696032000],
               "annualTotalRevenue":[null,
                 {"asOfDate":"2023-09-30","periodType":"12M","reportedValue":{"raw":383285000000.0,"fmt":"383.29B"}}]},
              {"meta":{"symbol":["AAPL"],"type":["trailingMarketCap"]},"timestamp":[1729555200],
               "trailingMarketCap":[
                 {"asOfDate":"2024-10-22","periodType":"TTM","reportedValue":{"raw":3566000000000.0,"fmt":"3.57T"}}]}
            ],"error":null}}"#,
        );
        let f = YahooProvider::parse_fundamentals("AAPL", resp).unwrap();
        assert_eq!(f.net_income, Some(96_995_000_000.0));
        assert_eq!(f.total_revenue, Some(383_285_000_000.0));
        assert_eq!(f.market_cap, Some(3_566_000_000_000.0));
    }

    #[test]
    fn fundamentals_without_market_cap_still_succeed() {
        let resp = timeseries(
            r#"{"timeseries":{"result":[
              {"meta":{"type":["annualNetIncome"]},
               "annualNetIncome":[{"asOfDate":"2023-12-31","reportedValue":{"raw":-12.0}}]},
              {"meta":{"type":["annualTotalRevenue"]},
               "annualTotalRevenue":[{"asOfDate":"2023-12-31","reportedValue":{"raw":900.0}}]},
              {"meta":{"type":["trailingMarketCap"]}}
            ],"error":null}}"#,
        );
        let f = YahooProvider::parse_fundamentals("BEP", resp).unwrap();
        assert_eq!(f.net_income, Some(-12.0));
        assert_eq!(f.market_cap, None);
    }

    #[test]
    fn fundamentals_missing_net_income_is_an_error() {
        let resp = timeseries(
            r#"{"timeseries":{"result":[
              {"meta":{"type":["annualNetIncome"]}},
              {"meta":{"type":["annualTotalRevenue"]},
               "annualTotalRevenue":[{"asOfDate":"2023-12-31","reportedValue":{"raw":900.0}}]}
            ],"error":null}}"#,
        );
        let err = YahooProvider::parse_fundamentals("SPY", resp).unwrap_err();
        match err {
            DataError::MissingLineItem { symbol, item } => {
                assert_eq!(symbol, "SPY");
                assert_eq!(item, "Net Income");
            }
            other => panic!("expected MissingLineItem, got: {other:?}"),
        }
    }
}
