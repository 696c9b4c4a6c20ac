//! Core data types for FII ingestion.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Ticker`] - Exchange symbol identifying a fund
//! - [`Fund`] - One fund's scraped indicator snapshot

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An exchange ticker symbol for a fund.
///
/// Tickers are automatically uppercased on creation and never change after a
/// [`Fund`] is built around them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One fund's indicator snapshot as reported by the detail page.
///
/// Every indicator is optional: `None` means "not reported by the source",
/// never zero. A record holding only the ticker is a valid intermediate state
/// (freshly listed, not yet enriched).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Exchange ticker. Unique key; fixed at creation.
    pub ticker: Ticker,

    // Identity
    /// Fund name.
    pub name: Option<String>,
    /// Mandate (e.g. "Renda", "Híbrido").
    pub mandate: Option<String>,
    /// Market segment.
    pub segment: Option<String>,
    /// Management type (active/passive).
    pub management_type: Option<String>,

    // Quotation
    /// Last quoted share price.
    pub price: Option<f64>,
    /// Date of the last quote, as reported.
    pub last_quote_date: Option<String>,
    /// 52-week low.
    pub low_52_weeks: Option<f64>,
    /// 52-week high.
    pub high_52_weeks: Option<f64>,
    /// Average daily traded volume over two months.
    pub avg_volume_2m: Option<f64>,
    /// Market value of the fund.
    pub market_value: Option<f64>,
    /// Number of issued shares.
    pub share_count: Option<f64>,
    /// Date of the last management report, as reported.
    pub last_management_report: Option<String>,
    /// Date of the last quarterly report, as reported.
    pub last_quarterly_report: Option<String>,
    /// Price variation over the day (fractional, 0.01 = 1%).
    pub change_day: Option<f64>,
    /// Price variation over the current month.
    pub change_month: Option<f64>,
    /// Price variation over the last 30 days.
    pub change_30_days: Option<f64>,
    /// Price variation over the last 12 months.
    pub change_12_months: Option<f64>,

    // Yield indicators
    /// Funds-from-operations yield.
    pub ffo_yield: Option<f64>,
    /// Funds from operations per share.
    pub ffo_per_share: Option<f64>,
    /// Dividend yield.
    pub dividend_yield: Option<f64>,
    /// Dividend per share.
    pub dividend_per_share: Option<f64>,
    /// Price-to-book ratio.
    pub price_to_book: Option<f64>,
    /// Book value per share.
    pub book_value_per_share: Option<f64>,

    // Result indicators, 12-month window
    /// Revenue over the last 12 months.
    pub revenue_12m: Option<f64>,
    /// Asset sales over the last 12 months.
    pub asset_sales_12m: Option<f64>,
    /// Funds from operations over the last 12 months.
    pub ffo_12m: Option<f64>,
    /// Income distributed over the last 12 months.
    pub distributed_income_12m: Option<f64>,

    // Result indicators, 3-month window
    /// Revenue over the last 3 months.
    pub revenue_3m: Option<f64>,
    /// Asset sales over the last 3 months.
    pub asset_sales_3m: Option<f64>,
    /// Funds from operations over the last 3 months.
    pub ffo_3m: Option<f64>,
    /// Income distributed over the last 3 months.
    pub distributed_income_3m: Option<f64>,

    // Equity indicators
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Net equity.
    pub net_equity: Option<f64>,

    // Real-estate indicators
    /// Number of properties held.
    pub property_count: Option<f64>,
    /// Number of rentable units.
    pub unit_count: Option<f64>,
    /// Properties as a fraction of the fund's net equity.
    pub property_to_equity: Option<f64>,
    /// Total rentable area in square meters.
    pub total_area_sqm: Option<f64>,
    /// Rent per square meter.
    pub rent_per_sqm: Option<f64>,
    /// Price per square meter.
    pub price_per_sqm: Option<f64>,
    /// Capitalization rate.
    pub cap_rate: Option<f64>,
    /// Average vacancy.
    pub avg_vacancy: Option<f64>,

    /// Whether the ticker was also resolvable in the price-history source.
    /// Set only by the pipeline after cross-referencing the price batch.
    pub has_price_data: bool,
}

impl Fund {
    /// Creates a fund record with all indicators unset.
    #[must_use]
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            ..Default::default()
        }
    }
}
