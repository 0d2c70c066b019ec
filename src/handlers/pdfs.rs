// src/handlers/pdfs.rs

use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, Request, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{
    error::AppError,
    models::{
        pdf::{PdfListResponse, PdfUploadForm, PdfUploadResponse},
        question::MessageResponse,
    },
    storage::pdfs::PdfStorage,
};

/// Lists the stored PDF file names.
#[utoipa::path(
    get,
    path = "/pdfs",
    tag = "pdfs",
    responses((status = 200, body = PdfListResponse))
)]
pub async fn list_pdfs(State(pdfs): State<PdfStorage>) -> Result<impl IntoResponse, AppError> {
    let files = pdfs.list().await?;
    Ok(Json(PdfListResponse::from(files)))
}

/// Uploads a PDF under its original file name.
///
/// The name is validated and checked for duplicates before the body is read.
/// Existing files are never overwritten.
#[utoipa::path(
    post,
    path = "/upload-pdf",
    tag = "pdfs",
    request_body(content = PdfUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = PdfUploadResponse),
        (status = 400, description = "Missing or invalid file name"),
        (status = 409, description = "A file with this name already exists"),
        (status = 413, description = "Upload exceeds MAX_UPLOAD_BYTES"),
        (status = 422, description = "No `file` field in the form")
    )
)]
pub async fn upload_pdf(
    State(pdfs): State<PdfStorage>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let name = pdfs.ensure_absent(&filename).await?;

        let contents = field.bytes().await?;
        let stored = pdfs.store(&name, &contents).await?;

        return Ok(Json(PdfUploadResponse {
            message: format!("PDF '{}' uploaded successfully", stored),
            filename: stored,
        }));
    }

    Err(AppError::UnprocessableEntity(
        "Field 'file' is required".to_string(),
    ))
}

/// Streams a stored PDF. Supports range requests.
#[utoipa::path(
    get,
    path = "/pdf/{filename}",
    tag = "pdfs",
    params(("filename" = String, Path, description = "Stored PDF name")),
    responses(
        (status = 200, description = "The PDF file, served as application/pdf"),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "PDF not found")
    )
)]
pub async fn download_pdf(
    State(pdfs): State<PdfStorage>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let path = pdfs.locate(&filename).await?;

    let mut response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
        .map(Body::new);

    if response.status().is_success() {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/pdf"),
        );
    }

    Ok(response)
}

#[utoipa::path(
    delete,
    path = "/pdf/{filename}",
    tag = "pdfs",
    params(("filename" = String, Path, description = "Stored PDF name")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "PDF not found")
    )
)]
pub async fn delete_pdf(
    State(pdfs): State<PdfStorage>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let name = pdfs.delete(&filename).await?;

    Ok(Json(MessageResponse {
        message: "PDF deleted successfully".to_string(),
        id: Some(name),
    }))
}
