// src/docs.rs

use utoipa::OpenApi;

use crate::{
    handlers::{health, pdfs, process, questions},
    models::{
        pdf::{PdfListResponse, PdfUploadForm, PdfUploadResponse},
        process::{AnswerStatus, ProcessRequest, ProcessResponse, ProcessResult},
        question::{MessageResponse, Question, QuestionInput, QuestionsResponse},
    },
};

/// OpenAPI document served at `/api-docs/openapi.json`, `/docs` and `/redoc`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Question & PDF Management API",
        description = "Stores PDF documents and a question dataset, and answers questions against a PDF."
    ),
    paths(
        health::health_check,
        questions::list_questions,
        questions::create_question,
        questions::get_question,
        questions::update_question,
        questions::delete_question,
        pdfs::list_pdfs,
        pdfs::upload_pdf,
        pdfs::download_pdf,
        pdfs::delete_pdf,
        process::process_questions,
    ),
    components(schemas(
        health::HealthResponse,
        Question,
        QuestionInput,
        QuestionsResponse,
        MessageResponse,
        PdfListResponse,
        PdfUploadResponse,
        PdfUploadForm,
        ProcessRequest,
        ProcessResult,
        ProcessResponse,
        AnswerStatus,
    )),
    tags(
        (name = "questions", description = "Question dataset management"),
        (name = "pdfs", description = "PDF storage"),
        (name = "process", description = "Answering questions against a PDF"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
