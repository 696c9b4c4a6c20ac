#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Pipeline orchestration.
//!
//! [`run_pipeline`] drives the whole run against the seam traits from
//! `fii-core`, so the concrete website, price API and S3 client stay
//! swappable in tests. Execution is strictly sequential: directory listing,
//! then one detail fetch at a time, then the price batch, then the uploads.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use polars::prelude::*;
use tracing::{error, info, warn};

use fii_core::{Fund, FundSource, IngestError, ObjectSink, PriceBatchSource, Result, Ticker};

/// Environment variable naming the destination bucket.
const BUCKET_ENV: &str = "BUCKET_S3";

/// Partition prefix for the daily indicator dataset.
const INDICATORS_PREFIX: &str = "raw/daily_indicators";

/// Partition prefix for the price snapshot dataset.
const PRICES_PREFIX: &str = "raw/price_history_snapshots";

/// Runtime configuration for one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Destination S3 bucket.
    pub bucket: String,
}

impl PipelineConfig {
    /// Reads the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        std::env::var(BUCKET_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .map(|bucket| Self { bucket })
            .ok_or_else(|| IngestError::MissingConfig(format!("{BUCKET_ENV} is not set")))
    }
}

/// Outcome summary of one pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Tickers found in the fund directory.
    pub funds_listed: usize,
    /// Funds whose detail page yielded an indicator snapshot.
    pub funds_scraped: usize,
    /// Tickers resolved by the price batch source.
    pub prices_found: usize,
    /// Whether the indicator dataset reached the sink.
    pub indicators_uploaded: bool,
    /// Whether the price dataset reached the sink.
    pub prices_uploaded: bool,
}

/// Object key for the indicator dataset of one ingestion date.
#[must_use]
pub fn indicators_key(ingest_date: NaiveDate) -> String {
    format!("{INDICATORS_PREFIX}/ingest_date={ingest_date}/data.parquet")
}

/// Object key for the price snapshot of one price date.
#[must_use]
pub fn prices_key(price_date: NaiveDate) -> String {
    format!("{PRICES_PREFIX}/price_date={price_date}/data.parquet")
}

/// Runs the full ingestion pipeline.
///
/// Fails only when the fund universe itself cannot be established; every
/// narrower failure (one ticker, the price batch, one upload) is logged and
/// reflected in the [`PipelineReport`] instead.
pub async fn run_pipeline(
    funds: &dyn FundSource,
    prices: &dyn PriceBatchSource,
    sink: &dyn ObjectSink,
    config: &PipelineConfig,
) -> Result<PipelineReport> {
    info!(source = funds.name(), "Starting FII ingestion pipeline");

    let universe = funds.list_funds().await;
    if universe.is_empty() {
        return Err(IngestError::Structure(
            "fund directory listing came back empty".to_string(),
        ));
    }

    let mut scraped = Vec::new();
    for fund in &universe {
        if let Some(snapshot) = funds.fetch_fund(&fund.ticker).await {
            scraped.push(snapshot);
        }
    }
    info!(
        scraped = scraped.len(),
        listed = universe.len(),
        "Indicator scrape complete"
    );

    let tickers: Vec<Ticker> = universe.iter().map(|f| f.ticker.clone()).collect();
    let mut price_frame = match prices.latest_closes(&tickers).await {
        Ok(df) => df,
        Err(e) => {
            warn!(source = prices.name(), error = %e, "Price batch fetch failed; continuing without prices");
            DataFrame::empty()
        }
    };
    info!(prices = price_frame.height(), "Price batch complete");

    mark_priced_funds(&mut scraped, &price_frame)?;

    let today = Utc::now().date_naive();
    let yesterday = today - chrono::Duration::days(1);

    let mut report = PipelineReport {
        funds_listed: universe.len(),
        funds_scraped: scraped.len(),
        prices_found: price_frame.height(),
        ..Default::default()
    };

    if scraped.is_empty() {
        warn!("No indicator data was collected; skipping indicator upload");
    } else {
        let mut df = funds_to_dataframe(&scraped)?;
        let key = indicators_key(today);
        match sink.put_dataframe(&mut df, &config.bucket, &key).await {
            Ok(()) => report.indicators_uploaded = true,
            Err(e) => error!(key, error = %e, "Indicator upload failed"),
        }
    }

    if price_frame.height() == 0 {
        warn!("No price data was collected; skipping price upload");
    } else {
        let key = prices_key(yesterday);
        match sink.put_dataframe(&mut price_frame, &config.bucket, &key).await {
            Ok(()) => report.prices_uploaded = true,
            Err(e) => error!(key, error = %e, "Price upload failed"),
        }
    }

    info!(?report, "Pipeline run complete");
    Ok(report)
}

/// Sets `has_price_data` exactly for funds whose ticker appears in the price
/// frame's `ticker` column.
pub fn mark_priced_funds(funds: &mut [Fund], prices: &DataFrame) -> Result<()> {
    if prices.height() == 0 {
        return Ok(());
    }

    let Ok(column) = prices.column("ticker") else {
        warn!("Price frame has no ticker column; no funds marked");
        return Ok(());
    };
    let tickers = column
        .str()
        .map_err(|e| IngestError::Other(e.to_string()))?;
    let priced: HashSet<&str> = tickers.into_iter().flatten().collect();

    for fund in funds.iter_mut() {
        fund.has_price_data = priced.contains(fund.ticker.as_str());
    }
    Ok(())
}

/// Converts fund records into a typed DataFrame, one row per fund.
pub fn funds_to_dataframe(funds: &[Fund]) -> Result<DataFrame> {
    let text = |name: &str, get: fn(&Fund) -> Option<String>| {
        Column::new(name.into(), funds.iter().map(get).collect::<Vec<_>>())
    };
    let number = |name: &str, get: fn(&Fund) -> Option<f64>| {
        Column::new(name.into(), funds.iter().map(get).collect::<Vec<_>>())
    };

    let columns = vec![
        Column::new(
            "ticker".into(),
            funds.iter().map(|f| f.ticker.as_str()).collect::<Vec<_>>(),
        ),
        text("name", |f| f.name.clone()),
        text("mandate", |f| f.mandate.clone()),
        text("segment", |f| f.segment.clone()),
        text("management_type", |f| f.management_type.clone()),
        number("price", |f| f.price),
        text("last_quote_date", |f| f.last_quote_date.clone()),
        number("low_52_weeks", |f| f.low_52_weeks),
        number("high_52_weeks", |f| f.high_52_weeks),
        number("avg_volume_2m", |f| f.avg_volume_2m),
        number("market_value", |f| f.market_value),
        number("share_count", |f| f.share_count),
        text("last_management_report", |f| f.last_management_report.clone()),
        text("last_quarterly_report", |f| f.last_quarterly_report.clone()),
        number("change_day", |f| f.change_day),
        number("change_month", |f| f.change_month),
        number("change_30_days", |f| f.change_30_days),
        number("change_12_months", |f| f.change_12_months),
        number("ffo_yield", |f| f.ffo_yield),
        number("ffo_per_share", |f| f.ffo_per_share),
        number("dividend_yield", |f| f.dividend_yield),
        number("dividend_per_share", |f| f.dividend_per_share),
        number("price_to_book", |f| f.price_to_book),
        number("book_value_per_share", |f| f.book_value_per_share),
        number("revenue_12m", |f| f.revenue_12m),
        number("asset_sales_12m", |f| f.asset_sales_12m),
        number("ffo_12m", |f| f.ffo_12m),
        number("distributed_income_12m", |f| f.distributed_income_12m),
        number("revenue_3m", |f| f.revenue_3m),
        number("asset_sales_3m", |f| f.asset_sales_3m),
        number("ffo_3m", |f| f.ffo_3m),
        number("distributed_income_3m", |f| f.distributed_income_3m),
        number("total_assets", |f| f.total_assets),
        number("net_equity", |f| f.net_equity),
        number("property_count", |f| f.property_count),
        number("unit_count", |f| f.unit_count),
        number("property_to_equity", |f| f.property_to_equity),
        number("total_area_sqm", |f| f.total_area_sqm),
        number("rent_per_sqm", |f| f.rent_per_sqm),
        number("price_per_sqm", |f| f.price_per_sqm),
        number("cap_rate", |f| f.cap_rate),
        number("avg_vacancy", |f| f.avg_vacancy),
        Column::new(
            "has_price_data".into(),
            funds.iter().map(|f| f.has_price_data).collect::<Vec<_>>(),
        ),
    ];

    DataFrame::new(columns).map_err(|e| IngestError::Other(e.to_string()))
}
