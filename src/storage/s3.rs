//! S3 blob storage backend for uploaded audio files.
//!
//! Stores blobs as objects under an optional key prefix and streams them back
//! with ranged `GetObject` requests, so a seek inside a large track never
//! pulls the whole object. Custom endpoints (MinIO, LocalStack, etc.) are
//! supported for S3-compatible services.

use super::{BlobStore, ByteStream};
use crate::{Error, Result, range::ByteSpan};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tokio_util::io::ReaderStream;

pub struct S3BlobStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3BlobStore {
    /// Create a new S3BlobStore instance.
    ///
    /// # Arguments
    ///
    /// * `bucket` - S3 bucket name
    /// * `prefix` - Key prefix (e.g., "library/audio/")
    /// * `region` - Optional AWS region (uses SDK defaults if not specified)
    /// * `endpoint` - Optional custom endpoint URL (for S3-compatible services)
    pub async fn new(
        bucket: String,
        prefix: String,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self> {
        let mut config_loader = aws_config::from_env();

        if let Some(region) = region {
            config_loader = config_loader.region(aws_config::Region::new(region));
        }

        let sdk_config = config_loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(s3_config.build());

        Ok(Self {
            client,
            bucket,
            prefix,
        })
    }
}

fn object_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, name: &str, data: Bytes, content_type: &str) -> Result<String> {
        let key = object_key(&self.prefix, name);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("S3 put_object failed: {}", e)))?;
        Ok(key)
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(reference)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("S3 delete_object failed: {}", e)))?;
        Ok(())
    }

    async fn size(&self, reference: &str) -> Result<u64> {
        let head = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(reference)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("S3 head_object failed: {}", e)))?;
        Ok(head.content_length().unwrap_or(0) as u64)
    }

    async fn open(&self, reference: &str, span: Option<ByteSpan>) -> Result<ByteStream> {
        let mut request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(reference);

        if let Some(span) = span {
            request = request.range(format!("bytes={}-{}", span.start, span.end));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Storage(format!("S3 get_object failed: {}", e)))?;

        Ok(Box::pin(ReaderStream::new(response.body.into_async_read())))
    }
}
