use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::storage::{BlobReader, BlobStore, StoredBlob, UploadStream};

/// Local file system blob store
pub struct LocalBlobStore {
    upload_dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Create the target file without clobbering an existing blob.
    /// Two uploads of the same name in the same millisecond fall back
    /// to a UUID-qualified name.
    async fn create_unique(&self, original_name: &str) -> Result<(PathBuf, fs::File)> {
        let millis = Utc::now().timestamp_millis();
        let name = blob_file_name(original_name);

        let primary = self.upload_dir.join(format!("{}-{}", millis, name));
        match create_new(&primary).await {
            Ok(file) => return Ok((primary, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!("Blob name {:?} taken, adding uuid", primary);
            }
            Err(e) => return Err(AppError::StorageWrite(e)),
        }

        let fallback = self
            .upload_dir
            .join(format!("{}-{}-{}", millis, Uuid::new_v4().simple(), name));
        let file = create_new(&fallback)
            .await
            .map_err(AppError::StorageWrite)?;
        Ok((fallback, file))
    }

    async fn discard(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!("Failed to remove partial blob {:?}: {}", path, e);
        }
    }
}

async fn create_new(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
}

/// On-disk name for an upload: the last path segment of the original
/// name with each run of whitespace collapsed to `_`.
pub fn blob_file_name(original_name: &str) -> String {
    let last_segment = original_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or("document.pdf");

    let mut out = String::with_capacity(last_segment.len());
    let mut in_whitespace = false;
    for c in last_segment.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, original_name: &str, mut content: UploadStream<'_>) -> Result<StoredBlob> {
        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(AppError::StorageWrite)?;

        let (path, mut file) = self.create_unique(original_name).await?;

        let mut size_bytes: u64 = 0;
        let written: Result<()> = async {
            while let Some(chunk) = content.next().await {
                let chunk = chunk.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {}", e))
                })?;
                file.write_all(&chunk)
                    .await
                    .map_err(AppError::StorageWrite)?;
                size_bytes += chunk.len() as u64;
            }
            file.flush().await.map_err(AppError::StorageWrite)?;
            Ok(())
        }
        .await;

        if let Err(e) = written {
            drop(file);
            self.discard(&path).await;
            return Err(e);
        }

        tracing::debug!("Saved blob {:?} ({} bytes)", path, size_bytes);
        Ok(StoredBlob {
            storage_path: path.to_string_lossy().into_owned(),
            size_bytes,
        })
    }

    async fn delete(&self, storage_path: &str) -> Result<bool> {
        match fs::remove_file(storage_path).await {
            Ok(()) => {
                tracing::debug!("Deleted blob {}", storage_path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Blob {} already absent", storage_path);
                Ok(false)
            }
            Err(e) => Err(AppError::StorageWrite(e)),
        }
    }

    async fn exists(&self, storage_path: &str) -> Result<bool> {
        fs::try_exists(storage_path)
            .await
            .map_err(AppError::StorageRead)
    }

    async fn open_read(&self, storage_path: &str) -> Result<BlobReader> {
        let file = fs::File::open(storage_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::BlobMissing(storage_path.to_string())
            } else {
                AppError::StorageRead(e)
            }
        })?;

        let size_bytes = file
            .metadata()
            .await
            .map_err(AppError::StorageRead)?
            .len();

        Ok(BlobReader {
            size_bytes,
            stream: ReaderStream::new(file).boxed(),
        })
    }
}
