// src/handlers/questions.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::question::{MessageResponse, Question, QuestionInput, QuestionsResponse},
    storage::questions::QuestionStore,
};

/// Lists every question in stored order.
#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    responses(
        (status = 200, description = "All questions", body = QuestionsResponse),
        (status = 500, description = "Stored data is invalid")
    )
)]
pub async fn list_questions(
    State(store): State<Arc<QuestionStore>>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list().await?;
    Ok(Json(QuestionsResponse::from(questions)))
}

/// Creates a new question with a server-assigned id.
#[utoipa::path(
    post,
    path = "/question",
    tag = "questions",
    request_body = QuestionInput,
    responses(
        (status = 200, description = "Created question", body = Question),
        (status = 422, description = "Question text is empty")
    )
)]
pub async fn create_question(
    State(store): State<Arc<QuestionStore>>,
    payload: Result<Json<QuestionInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let question = store.create(payload).await?;
    tracing::info!("Question {} created", question.id);
    Ok(Json(question))
}

#[utoipa::path(
    get,
    path = "/question/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, body = Question),
        (status = 404, description = "Question not found")
    )
)]
pub async fn get_question(
    State(store): State<Arc<QuestionStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.get(&id).await?))
}

/// Replaces the text and method of a question. The id is kept.
#[utoipa::path(
    put,
    path = "/question/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Question id")),
    request_body = QuestionInput,
    responses(
        (status = 200, body = Question),
        (status = 404, description = "Question not found"),
        (status = 422, description = "Question text is empty")
    )
)]
pub async fn update_question(
    State(store): State<Arc<QuestionStore>>,
    Path(id): Path<String>,
    payload: Result<Json<QuestionInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let question = store.update(&id, payload).await?;
    Ok(Json(question))
}

#[utoipa::path(
    delete,
    path = "/question/{id}",
    tag = "questions",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Question not found")
    )
)]
pub async fn delete_question(
    State(store): State<Arc<QuestionStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.delete(&id).await?;
    tracing::info!("Question {} deleted", id);

    Ok(Json(MessageResponse {
        message: "Question deleted successfully".to_string(),
        id: Some(id),
    }))
}
