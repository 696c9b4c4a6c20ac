#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! S3 object sink.
//!
//! Implements [`ObjectSink`] by writing the frame to an in-memory Parquet
//! buffer and issuing one `put_object` call. Credentials come from the
//! ambient environment (profile, env vars, or an attached role); their
//! absence surfaces as an [`IngestError::Sink`] at upload time, never a
//! panic.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use polars::prelude::*;
use tracing::info;

use fii_core::{IngestError, ObjectSink, Result};

/// S3-backed [`ObjectSink`].
#[derive(Debug)]
pub struct S3Sink {
    client: aws_sdk_s3::Client,
}

impl S3Sink {
    /// Creates a sink from the ambient AWS environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
        }
    }

    /// Creates a sink around an existing S3 client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectSink for S3Sink {
    async fn put_dataframe(&self, df: &mut DataFrame, bucket: &str, key: &str) -> Result<()> {
        info!(bucket, key, rows = df.height(), "Uploading DataFrame as Parquet");

        let buffer = to_parquet_bytes(df)?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(buffer))
            .send()
            .await
            .map_err(|e| IngestError::Sink(format!("Upload to s3://{bucket}/{key} failed: {e}")))?;

        info!(bucket, key, "Upload complete");
        Ok(())
    }
}

/// Encodes a DataFrame as Parquet into an owned buffer.
pub fn to_parquet_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    ParquetWriter::new(&mut buffer)
        .finish(df)
        .map_err(|e| IngestError::Sink(format!("Parquet encoding failed: {e}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parquet_encoding_produces_bytes() {
        let mut df = DataFrame::new(vec![
            Column::new("ticker".into(), vec!["MXRF11", "HGLG11"]),
            Column::new("close".into(), vec![10.5, 160.2]),
        ])
        .unwrap();

        let bytes = to_parquet_bytes(&mut df).unwrap();
        assert!(!bytes.is_empty());
        // Parquet magic number frames the file
        assert_eq!(&bytes[..4], b"PAR1");
        assert_eq!(&bytes[bytes.len() - 4..], b"PAR1");
    }
}
