use crate::db::Database;
use crate::error::Result;
use crate::models::{Document, NewDocument};

/// Access to the `documents` table
pub struct MetadataStore;

impl MetadataStore {
    /// Insert a row and return its id
    pub async fn insert(db: &Database, doc: &NewDocument) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (filename, filepath, filesize, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&doc.filename)
        .bind(&doc.storage_path)
        .bind(doc.size_bytes)
        .bind(&doc.created_at)
        .execute(db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id(db: &Database, id: i64) -> Result<Option<Document>> {
        let doc = sqlx::query_as(
            "SELECT id, filename, filepath, filesize, created_at FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

        Ok(doc)
    }

    /// All rows, newest first. Rows sharing a timestamp fall back to id order.
    pub async fn list_all(db: &Database) -> Result<Vec<Document>> {
        let docs = sqlx::query_as(
            "SELECT id, filename, filepath, filesize, created_at FROM documents ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(db.pool())
        .await?;

        Ok(docs)
    }

    /// Delete a row. Deleting an unknown id is a no-op that returns false.
    pub async fn delete_by_id(db: &Database, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
