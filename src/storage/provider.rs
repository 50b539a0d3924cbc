use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::Result;

/// Incoming bytes of an upload. Errors are reported by the producer
/// (typically a multipart field).
pub type UploadStream<'a> = BoxStream<'a, std::io::Result<Bytes>>;

/// Outgoing bytes of a stored blob
pub type BlobStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Where a freshly written blob ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub storage_path: String,
    pub size_bytes: u64,
}

/// An opened blob, ready to be streamed
pub struct BlobReader {
    pub size_bytes: u64,
    pub stream: BlobStream,
}

/// Blob store trait
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write the stream under a generated name derived from `original_name`
    async fn save(&self, original_name: &str, content: UploadStream<'_>) -> Result<StoredBlob>;

    /// Remove a blob. Returns false when nothing was there to remove.
    async fn delete(&self, storage_path: &str) -> Result<bool>;

    /// Check if a blob exists
    async fn exists(&self, storage_path: &str) -> Result<bool>;

    /// Open a blob for streaming
    async fn open_read(&self, storage_path: &str) -> Result<BlobReader>;
}
