use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Blob missing: {0}")]
    BlobMissing(String),

    #[error("Storage write error: {0}")]
    StorageWrite(#[source] std::io::Error),

    #[error("Storage read error: {0}")]
    StorageRead(#[source] std::io::Error),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// JSON body for errors and plain acknowledgements
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::BlobMissing(_) => StatusCode::NOT_FOUND,
            AppError::StorageWrite(_)
            | AppError::StorageRead(_)
            | AppError::Persistence(_)
            | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::BlobMissing(path) => {
                tracing::warn!("Blob missing on disk: {}", path);
                "File not found on disk.".to_string()
            }
            AppError::StorageWrite(e) => {
                tracing::error!("Storage write error: {:?}", e);
                "Failed to store file.".to_string()
            }
            AppError::StorageRead(e) => {
                tracing::error!("Storage read error: {:?}", e);
                "Failed to read file.".to_string()
            }
            AppError::Persistence(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error.".to_string()
            }
            AppError::Unexpected(msg) => {
                tracing::error!("Unexpected error: {}", msg);
                "Internal server error.".to_string()
            }
        };

        (self.status_code(), Json(MessageResponse::new(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
