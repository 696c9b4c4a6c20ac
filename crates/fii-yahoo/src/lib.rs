#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance latest-close provider.
//!
//! Implements [`PriceBatchSource`] over the Yahoo chart API. Requests run
//! sequentially, one ticker at a time; unknown tickers are skipped with a
//! warning so a bad symbol never rejects the rest of the batch.
//!
//! # Example
//!
//! ```no_run
//! use fii_yahoo::YahooQuotes;
//! use fii_core::{PriceBatchSource, Ticker};
//!
//! # async fn example() -> fii_core::Result<()> {
//! let quotes = YahooQuotes::new();
//! let tickers = vec![Ticker::new("MXRF11"), Ticker::new("HGLG11")];
//! let df = quotes.latest_closes(&tickers).await?;
//! println!("Closes for {} tickers", df.height());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use polars::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

use fii_core::{IngestError, PriceBatchSource, Result, Ticker};

/// Yahoo Finance chart API base URL.
const CHART_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Exchange suffix Yahoo uses for B3-listed symbols.
const B3_SUFFIX: &str = ".SA";

/// Lookback window wide enough to always contain a trading day.
const LOOKBACK_DAYS: i64 = 30;

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Yahoo Finance latest-close batch provider.
///
/// Implements [`PriceBatchSource`].
#[derive(Debug)]
pub struct YahooQuotes {
    client: reqwest::Client,
}

impl YahooQuotes {
    /// Creates a provider with default settings.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds the chart API URL for a suffixed ticker and date range.
    fn build_chart_url(&self, ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or(0);

        let end_ts = end
            .and_hms_opt(23, 59, 59)
            .map(|dt| Utc.from_utc_datetime(&dt).timestamp())
            .unwrap_or(0);

        format!(
            "{}/{}{}?period1={}&period2={}&interval=1d",
            CHART_API_URL,
            ticker.as_str(),
            B3_SUFFIX,
            start_ts,
            end_ts
        )
    }

    /// Fetches one ticker's most recent close within the window.
    ///
    /// `Ok(None)` means the ticker is unknown to Yahoo or has no priced day
    /// in the window; `Err` is a transport or decoding failure.
    async fn fetch_latest_close(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<ClosingPrice>> {
        let url = self.build_chart_url(ticker, start, end);
        debug!(%ticker, url, "Fetching latest close");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IngestError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(IngestError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                ticker
            )));
        }

        let chart: ChartResponse = response
            .json()
            .await
            .map_err(|e| IngestError::Parse(e.to_string()))?;

        if let Some(error) = chart.chart.error {
            if error.code == "Not Found" {
                return Ok(None);
            }
            return Err(IngestError::Other(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        let Some(result) = chart.chart.result.into_iter().next() else {
            return Ok(None);
        };

        Ok(latest_close(&result))
    }
}

impl Default for YahooQuotes {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceBatchSource for YahooQuotes {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn latest_closes(&self, tickers: &[Ticker]) -> Result<DataFrame> {
        let end = Utc::now().date_naive();
        let start = end - chrono::Duration::days(LOOKBACK_DAYS);

        let mut out_tickers: Vec<String> = Vec::new();
        let mut out_dates: Vec<String> = Vec::new();
        let mut out_closes: Vec<f64> = Vec::new();
        let mut out_volumes: Vec<Option<u64>> = Vec::new();

        for ticker in tickers {
            match self.fetch_latest_close(ticker, start, end).await {
                Ok(Some(price)) => {
                    out_tickers.push(ticker.as_str().to_string());
                    out_dates.push(price.date.format("%Y-%m-%d").to_string());
                    out_closes.push(price.close);
                    out_volumes.push(price.volume);
                }
                Ok(None) => {
                    debug!(%ticker, "No recent close; ticker skipped");
                }
                Err(e) => {
                    warn!(%ticker, error = %e, "Price lookup failed; ticker skipped");
                }
            }
        }

        DataFrame::new(vec![
            Column::new("ticker".into(), out_tickers),
            Column::new("date".into(), out_dates),
            Column::new("close".into(), out_closes),
            Column::new("volume".into(), out_volumes),
        ])
        .map_err(|e| IngestError::Other(e.to_string()))
    }
}

/// One resolved closing price.
#[derive(Clone, Debug, PartialEq)]
struct ClosingPrice {
    date: NaiveDate,
    close: f64,
    volume: Option<u64>,
}

/// Picks the most recent day carrying a non-null close.
fn latest_close(data: &ChartData) -> Option<ClosingPrice> {
    let timestamps = data.timestamp.as_deref().unwrap_or_default();
    let quote = data.indicators.quote.first()?;

    timestamps
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, &ts)| {
            let close = quote.close.get(index).copied().flatten()?;
            let date = Utc.timestamp_opt(ts, 0).single()?.date_naive();
            let volume = quote.volume.get(index).copied().flatten();
            Some(ClosingPrice {
                date,
                close,
                volume,
            })
        })
}

// ============================================================================
// Yahoo Finance API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    result: Vec<ChartData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
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
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chart_url_suffixes_b3() {
        let quotes = YahooQuotes::new();
        let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let url = quotes.build_chart_url(&Ticker::new("MXRF11"), start, end);

        assert!(url.contains("MXRF11.SA"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn test_latest_close_skips_trailing_nulls() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1735171200, 1735257600, 1735344000],
                    "indicators": {
                        "quote": [{
                            "close": [10.1, 10.4, null],
                            "volume": [1000, 2000, null]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let chart: ChartResponse = serde_json::from_str(json).unwrap();
        let data = chart.chart.result.first().unwrap();

        let price = latest_close(data).unwrap();
        assert_eq!(price.close, 10.4);
        assert_eq!(price.volume, Some(2000));
        assert_eq!(price.date, NaiveDate::from_ymd_opt(2024, 12, 27).unwrap());
    }

    #[test]
    fn test_latest_close_with_no_priced_day_is_none() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1735171200],
                    "indicators": {"quote": [{"close": [null], "volume": [null]}]}
                }],
                "error": null
            }
        }"#;
        let chart: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(latest_close(chart.chart.result.first().unwrap()).is_none());
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(YahooQuotes::new().name(), "Yahoo Finance");
    }
}
