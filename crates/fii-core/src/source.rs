//! Seam traits implemented by the provider and sink crates.
//!
//! - [`FundSource`] - fund universe listing and per-ticker indicator scrape
//! - [`PriceBatchSource`] - batch latest-close lookup
//! - [`ObjectSink`] - tabular upload to partitioned object storage

use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::fmt::Debug;

use crate::error::Result;
use crate::types::{Fund, Ticker};

/// Source of the tradable fund universe and per-fund indicator data.
#[async_trait]
pub trait FundSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g. "Fundamentus").
    fn name(&self) -> &str;

    /// Lists every known fund, deduplicated by ticker.
    ///
    /// Returns an empty collection (after logging at error severity) when
    /// the listing page cannot be fetched or lacks the expected table; the
    /// caller decides whether an empty universe halts the pipeline.
    async fn list_funds(&self) -> Vec<Fund>;

    /// Fetches the indicator snapshot for one ticker.
    ///
    /// Returns `None` when the fetch fails or the detail page does not
    /// describe a real fund (invalid ticker).
    async fn fetch_fund(&self, ticker: &Ticker) -> Option<Fund>;
}

/// Batch source of each ticker's most recent closing price.
#[async_trait]
pub trait PriceBatchSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g. "Yahoo Finance").
    fn name(&self) -> &str;

    /// Fetches the most recent close within a lookback window for each
    /// ticker.
    ///
    /// Returns a DataFrame with columns `ticker`, `date`, `close`, `volume`,
    /// at most one row per ticker. Tickers the source does not recognize
    /// are silently absent from the result; they never reject the batch.
    async fn latest_closes(&self, tickers: &[Ticker]) -> Result<DataFrame>;
}

/// Destination for tabular pipeline output.
#[async_trait]
pub trait ObjectSink: Send + Sync + Debug {
    /// Uploads a DataFrame as one object stored under `key` in `bucket`.
    async fn put_dataframe(&self, df: &mut DataFrame, bucket: &str, key: &str) -> Result<()>;
}
