#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Fundamentus scraping provider.
//!
//! Implements [`FundSource`] against the public Fundamentus website:
//!
//! - The FII directory page yields the tradable ticker universe
//! - Each detail page yields a label/value indicator table, extracted by
//!   [`extract::extract_indicators`] and normalized into a [`Fund`] record
//!
//! # Example
//!
//! ```no_run
//! use fii_fundamentus::FundamentusProvider;
//! use fii_core::FundSource;
//!
//! # async fn example() {
//! let provider = FundamentusProvider::new();
//! let funds = provider.list_funds().await;
//! for fund in &funds {
//!     if let Some(snapshot) = provider.fetch_fund(&fund.ticker).await {
//!         println!("{}: P/VP {:?}", snapshot.ticker, snapshot.price_to_book);
//!     }
//! }
//! # }
//! ```

/// Raw indicator-table extraction from detail-page HTML.
pub mod extract;
mod fetch;
mod model;

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, error, info};

use fii_core::{Fund, FundSource, IndicatorSet, Ticker};

use crate::extract::extract_indicators;
use crate::fetch::{build_client, fetch_html};
use crate::model::fund_from_indicators;

/// Directory page listing every tradable FII.
const LISTING_URL: &str = "https://www.fundamentus.com.br/fii_imoveis.php";

/// Detail-page URL; takes the ticker as the `papel` query parameter.
const DETAIL_URL: &str = "https://www.fundamentus.com.br/detalhes.php";

/// Label whose presence proves the detail page describes a real fund.
const PRICE_LABEL: &str = "Cotação";

static DIRECTORY_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#tabelaFiiImoveis").expect("static selector"));
static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("static selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));

/// Fundamentus scraping provider.
///
/// Implements [`FundSource`]. Requests run strictly sequentially, one at a
/// time, with a bounded per-request timeout.
#[derive(Debug)]
pub struct FundamentusProvider {
    client: reqwest::Client,
    listing_url: String,
    detail_url: String,
}

impl FundamentusProvider {
    /// Creates a provider pointing at the public Fundamentus site.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: build_client(),
            listing_url: LISTING_URL.to_string(),
            detail_url: DETAIL_URL.to_string(),
        }
    }

    /// Creates a provider against alternative base URLs.
    #[must_use]
    pub fn with_urls(listing_url: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            listing_url: listing_url.into(),
            detail_url: detail_url.into(),
        }
    }
}

impl Default for FundamentusProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FundSource for FundamentusProvider {
    fn name(&self) -> &str {
        "Fundamentus"
    }

    async fn list_funds(&self) -> Vec<Fund> {
        info!(url = %self.listing_url, "Fetching fund directory");
        let Some(body) = fetch_html(&self.client, &self.listing_url).await else {
            return Vec::new();
        };
        let funds = parse_fund_directory(&body);
        info!(count = funds.len(), "Funds found in directory");
        funds
    }

    async fn fetch_fund(&self, ticker: &Ticker) -> Option<Fund> {
        let url = format!("{}?papel={}", self.detail_url, ticker);
        debug!(%ticker, "Fetching fund indicators");
        let body = fetch_html(&self.client, &url).await?;
        fund_from_detail_page(ticker, &body)
    }
}

/// Parses the directory page into one fund per distinct ticker.
///
/// The first cell of every body row of `table#tabelaFiiImoveis` holds the
/// ticker. Duplicate tickers collapse to a single record. A page without the
/// expected table yields an empty collection after an error log; the caller
/// decides whether that halts the pipeline.
#[must_use]
pub fn parse_fund_directory(html: &str) -> Vec<Fund> {
    let document = Html::parse_document(html);

    let Some(table) = document.select(&DIRECTORY_TABLE).next() else {
        error!("Fund directory table not found in listing page");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut funds = Vec::new();
    for row in table.select(&BODY_ROW) {
        let Some(cell) = row.select(&CELL).next() else {
            continue;
        };
        let text = cell.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let ticker = Ticker::new(text);
        if seen.insert(ticker.clone()) {
            funds.push(Fund::new(ticker));
        }
    }
    funds
}

/// Builds a fund record from detail-page HTML.
///
/// Returns `None` when the page has no indicator table or lacks the
/// quotation-price label, the existence proof for a valid ticker.
#[must_use]
pub fn fund_from_detail_page(ticker: &Ticker, html: &str) -> Option<Fund> {
    let raw = extract_indicators(html);
    if raw.is_empty() || !raw.contains(PRICE_LABEL) {
        info!(%ticker, "Detail page has no quotation data; ticker treated as invalid");
        return None;
    }
    let indicators = IndicatorSet::from_raw(&raw);
    Some(fund_from_indicators(ticker.clone(), &indicators))
}
