use std::path::Path;

use mime_guess::mime;

use crate::error::{AppError, Result};

const PDF_REJECTED: &str = "Only PDF files are allowed";

/// Accept an upload only when both its declared media type and its
/// extension say PDF. Runs before any byte reaches the blob store.
pub fn ensure_pdf(filename: &str, content_type: Option<&str>) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(AppError::Validation(
            "No file uploaded or invalid file type.".to_string(),
        ));
    }

    let is_pdf_mime = content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .map(|m| m.essence_str() == mime::APPLICATION_PDF.essence_str())
        .unwrap_or(false);

    let is_pdf_ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf_mime && is_pdf_ext {
        Ok(())
    } else {
        Err(AppError::Validation(PDF_REJECTED.to_string()))
    }
}
