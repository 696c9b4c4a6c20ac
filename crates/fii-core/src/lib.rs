#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for FII ingestion.
//!
//! This crate provides the foundational abstractions of the pipeline:
//!
//! - [`Fund`](types::Fund) - explicit record of one fund's ~40 optional indicators
//! - [`normalize`](normalize::normalize) - locale-aware raw text coercion
//! - [`RawIndicators`](indicators::RawIndicators) / [`IndicatorSet`](indicators::IndicatorSet) - ordered label maps
//! - [`FundSource`](source::FundSource), [`PriceBatchSource`](source::PriceBatchSource),
//!   [`ObjectSink`](source::ObjectSink) - seams implemented by provider/sink crates

/// Error types for ingestion operations.
pub mod error;
/// Ordered raw and normalized indicator maps.
pub mod indicators;
/// Raw value normalization rules.
pub mod normalize;
/// Seam traits for fund, price and sink collaborators.
pub mod source;
/// Core data types (Ticker, Fund).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{IngestError, Result};
pub use indicators::{IndicatorSet, RawIndicators};
pub use normalize::{IndicatorValue, normalize};
pub use source::{FundSource, ObjectSink, PriceBatchSource};
pub use types::{Fund, Ticker};
