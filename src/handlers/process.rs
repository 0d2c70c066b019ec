// src/handlers/process.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::process::{ProcessRequest, ProcessResponse},
    services::AnswerEngine,
    storage::{pdfs::PdfStorage, questions::QuestionStore},
};

/// Answers the selected questions against one stored PDF.
///
/// * Validates the PDF name and checks the file exists.
/// * Resolves every question id before any answering starts.
/// * Hands the batch to the configured answer engine.
#[utoipa::path(
    post,
    path = "/process",
    tag = "process",
    request_body = ProcessRequest,
    responses(
        (status = 200, body = ProcessResponse),
        (status = 400, description = "Invalid PDF name"),
        (status = 404, description = "PDF or question not found"),
        (status = 502, description = "Answering service failed")
    )
)]
pub async fn process_questions(
    State(pdfs): State<PdfStorage>,
    State(store): State<Arc<QuestionStore>>,
    State(engine): State<Arc<dyn AnswerEngine>>,
    request: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = request?;
    let pdf_path = pdfs.resolve(&request.pdf_name).await?;
    let questions = store.find_many(&request.question_ids).await?;

    tracing::info!(
        "Processing {} questions against '{}' with {} engine",
        questions.len(),
        request.pdf_name,
        engine.name()
    );

    let results = engine.answer(&questions, &pdf_path).await?;

    Ok(Json(ProcessResponse::from(results)))
}
