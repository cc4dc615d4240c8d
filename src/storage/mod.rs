//! Blob storage abstraction for uploaded audio files.
//!
//! This module provides a trait-based abstraction over where raw audio bytes
//! live, allowing the local filesystem and S3-compatible buckets to be used
//! interchangeably. The backend is selected once at configuration time.
//!
//! A blob is addressed by the opaque reference returned from [`BlobStore::upload`]:
//! a relative file name for [`LocalBlobStore`], an object key for the S3
//! backend. The reference is what gets persisted in a song record's
//! `location` field.

mod local;

pub use local::LocalBlobStore;

#[cfg(feature = "s3")]
mod s3;

#[cfg(feature = "s3")]
pub use s3::S3BlobStore;

use crate::{Result, range::ByteSpan};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Chunked byte source for a blob, bounded to the requested span.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Storage backend trait for uploaded audio blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Durably store `data` under `name` and return the reference under
    /// which it can later be opened or deleted.
    async fn upload(&self, name: &str, data: Bytes, content_type: &str) -> Result<String>;

    /// Delete the blob behind `reference`.
    async fn delete(&self, reference: &str) -> Result<()>;

    /// Total size of the blob in bytes.
    async fn size(&self, reference: &str) -> Result<u64>;

    /// Open a read cursor over the blob, restricted to `span` when given.
    /// Exactly one cursor is opened per call; it is released when the
    /// returned stream is dropped.
    async fn open(&self, reference: &str, span: Option<ByteSpan>) -> Result<ByteStream>;
}
