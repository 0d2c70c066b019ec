// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{health, pdfs, process, questions},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the question, PDF and process routes.
/// * Serves Swagger UI at `/docs` and ReDoc at `/redoc`.
/// * Applies global middleware (Trace, CORS, upload body limit).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let question_routes = Router::new()
        .route("/questions", get(questions::list_questions))
        .route("/question", post(questions::create_question))
        .route(
            "/question/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        );

    let pdf_routes = Router::new()
        .route("/pdfs", get(pdfs::list_pdfs))
        .route("/upload-pdf", post(pdfs::upload_pdf))
        .route(
            "/pdf/{filename}",
            get(pdfs::download_pdf).delete(pdfs::delete_pdf),
        );

    let process_routes = Router::new().route("/process", post(process::process_questions));

    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .merge(question_routes)
        .merge(pdf_routes)
        .merge(process_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
