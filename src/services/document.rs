use chrono::{SecondsFormat, Utc};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Document, NewDocument};
use crate::services::MetadataStore;
use crate::storage::{BlobReader, BlobStore, UploadStream};
use crate::validation::ensure_pdf;

/// Document service
///
/// Coordinates the blob store and the metadata table. The two are not
/// updated atomically:
/// - an upload whose metadata insert fails leaves its blob on disk;
/// - a delete whose blob removal fails still removes the row.
///
/// Both cases are logged and otherwise left alone.
pub struct DocumentService;

impl DocumentService {
    /// Validate, store the blob, then record it
    pub async fn upload(
        db: &Database,
        blobs: &dyn BlobStore,
        original_filename: &str,
        mime_type: Option<&str>,
        content: UploadStream<'_>,
    ) -> Result<Document> {
        ensure_pdf(original_filename, mime_type)?;

        let stored = blobs.save(original_filename, content).await?;

        let size_bytes = i64::try_from(stored.size_bytes).map_err(|_| {
            AppError::Unexpected(format!("Upload size {} out of range", stored.size_bytes))
        })?;

        let new_doc = NewDocument {
            filename: original_filename.to_string(),
            storage_path: stored.storage_path,
            size_bytes,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        let id = match MetadataStore::insert(db, &new_doc).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    "Failed to save metadata for {}, blob {} is orphaned",
                    new_doc.filename,
                    new_doc.storage_path
                );
                return Err(e);
            }
        };

        tracing::info!(
            "Uploaded document {} ({}, {} bytes) to {}",
            id,
            new_doc.filename,
            new_doc.size_bytes,
            new_doc.storage_path
        );

        Self::get(db, id).await
    }

    /// All documents, newest first
    pub async fn list(db: &Database) -> Result<Vec<Document>> {
        MetadataStore::list_all(db).await
    }

    /// Get a document by ID
    pub async fn get(db: &Database, id: i64) -> Result<Document> {
        MetadataStore::get_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found.".to_string()))
    }

    /// Look up a document and open its blob
    pub async fn download(
        db: &Database,
        blobs: &dyn BlobStore,
        id: i64,
    ) -> Result<(Document, BlobReader)> {
        let doc = Self::get(db, id).await?;

        if !blobs.exists(&doc.storage_path).await? {
            return Err(AppError::BlobMissing(doc.storage_path));
        }

        let reader = blobs.open_read(&doc.storage_path).await?;
        Ok((doc, reader))
    }

    /// Remove the blob (best effort), then the row
    pub async fn delete(db: &Database, blobs: &dyn BlobStore, id: i64) -> Result<()> {
        let doc = Self::get(db, id).await?;

        if let Err(e) = blobs.delete(&doc.storage_path).await {
            tracing::error!(
                "Failed to delete blob {} for document {}: {}",
                doc.storage_path,
                id,
                e
            );
        }

        MetadataStore::delete_by_id(db, id).await?;

        tracing::info!("Deleted document {} ({})", id, doc.filename);
        Ok(())
    }
}
