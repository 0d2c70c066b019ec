// src/models/pdf.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PdfListResponse {
    pub pdf_files: Vec<String>,
    pub count: usize,
}

impl From<Vec<String>> for PdfListResponse {
    fn from(pdf_files: Vec<String>) -> Self {
        Self {
            count: pdf_files.len(),
            pdf_files,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PdfUploadResponse {
    pub filename: String,
    pub message: String,
}

/// Multipart body accepted by `POST /upload-pdf`. Only used for the OpenAPI document.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PdfUploadForm {
    /// The PDF file. Its original name is kept on disk.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
