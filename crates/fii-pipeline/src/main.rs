//! Binary entry point for the FII ingestion pipeline.
//!
//! Reads the destination bucket from `BUCKET_S3`, wires the concrete
//! providers and sink together and runs the pipeline once. Exits non-zero
//! on a fatal error so the invoking runtime records the execution as failed.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fii_fundamentus::FundamentusProvider;
use fii_pipeline::{PipelineConfig, run_pipeline};
use fii_s3::S3Sink;
use fii_yahoo::YahooQuotes;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match PipelineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Pipeline configuration is incomplete");
            return ExitCode::FAILURE;
        }
    };

    let fundamentus = FundamentusProvider::new();
    let quotes = YahooQuotes::new();
    let sink = S3Sink::from_env().await;

    match run_pipeline(&fundamentus, &quotes, &sink, &config).await {
        Ok(report) => {
            info!(?report, "Pipeline finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Pipeline failed");
            ExitCode::FAILURE
        }
    }
}
