//! Error types for ingestion operations.
//!
//! This module defines [`IngestError`] which covers the failure taxonomy of
//! the pipeline: transport, structural-parse, value-parse, configuration and
//! sink failures.

use thiserror::Error;

/// Errors that can occur during ingestion operations.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Network-related errors (connection failures, timeouts, non-2xx).
    #[error("Network error: {0}")]
    Network(String),

    /// The requested ticker does not exist at the source.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// An expected page structure (table, marker label) was absent.
    #[error("Structure error: {0}")]
    Structure(String),

    /// Error parsing data from a source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required configuration is missing from the environment.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Error delivering data to the object-storage sink.
    #[error("Sink error: {0}")]
    Sink(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`IngestError`].
pub type Result<T> = std::result::Result<T, IngestError>;
