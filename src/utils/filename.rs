// src/utils/filename.rs

use crate::error::AppError;

/// Validates an uploaded or referenced PDF name and returns its base name.
///
/// * Rejects empty names and anything not ending in `.pdf` (case-insensitive).
/// * Strips any directory part, for both `/` and `\` separators.
/// * Rejects base names that are empty or contain `..`.
pub fn validate_pdf_filename(filename: &str) -> Result<String, AppError> {
    if filename.is_empty() {
        return Err(AppError::BadRequest("No filename provided".to_string()));
    }

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::BadRequest("Only PDF files are allowed.".to_string()));
    }

    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    if base.is_empty() || base.contains("..") {
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }

    Ok(base.to_string())
}

/// Rejects raw path segments that could escape the PDF directory.
pub fn ensure_plain_filename(filename: &str) -> Result<&str, AppError> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }
    Ok(filename)
}

pub fn is_pdf_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}
