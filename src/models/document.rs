use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Document metadata row
///
/// Serialized with the column names of the `documents` table, which is
/// the record shape clients see.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    /// Name as supplied by the uploader
    pub filename: String,
    /// Server-local location of the blob
    #[sqlx(rename = "filepath")]
    #[serde(rename = "filepath")]
    pub storage_path: String,
    #[sqlx(rename = "filesize")]
    #[serde(rename = "filesize")]
    pub size_bytes: i64,
    /// RFC 3339, UTC
    pub created_at: String,
}

/// Fields of a document that has not been assigned an id yet
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub storage_path: String,
    pub size_bytes: i64,
    pub created_at: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
