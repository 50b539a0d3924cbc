use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures::{StreamExt, TryStreamExt};

use crate::error::{AppError, MessageResponse, Result};
use crate::models::{Document, HealthResponse};
use crate::services::DocumentService;
use crate::AppState;

/// Liveness probe
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Upload a PDF
/// POST /documents/upload
///
/// Only the `file` field is read; other fields are skipped.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Document>)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::Validation(format!("Failed to process multipart: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let content = field
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            .boxed();

        let doc = DocumentService::upload(
            &state.db,
            state.blobs.as_ref(),
            &file_name,
            content_type.as_deref(),
            content,
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(doc)));
    }

    Err(AppError::Validation(
        "No file uploaded or invalid file type.".to_string(),
    ))
}

/// List documents, newest first
/// GET /documents
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    let docs = DocumentService::list(&state.db).await?;
    Ok(Json(docs))
}

/// Download a document as an attachment
/// GET /documents/:id
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let (doc, reader) = DocumentService::download(&state.db, state.blobs.as_ref(), id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, reader.size_bytes)
        .header(header::CONTENT_DISPOSITION, content_disposition(&doc.filename))
        .body(Body::from_stream(reader.stream))
        .map_err(|e| AppError::Unexpected(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// Delete a document and its file
/// DELETE /documents/:id
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    DocumentService::delete(&state.db, state.blobs.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Document deleted successfully.")))
}

/// `attachment` disposition with an ASCII fallback name and the exact
/// name in RFC 5987 form.
fn content_disposition(filename: &str) -> String {
    let fallback_name: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    let encoded_name = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback_name, encoded_name
    )
}
