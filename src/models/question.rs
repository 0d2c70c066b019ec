// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A single entry of the question dataset.
/// Wire names follow the stored JSON (`soru`, `yordam`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Question {
    /// Unique identifier (UUIDv4), assigned by the server.
    pub id: String,

    /// The question text.
    #[serde(rename = "soru")]
    #[validate(length(min = 1, message = "Question text must not be empty."))]
    pub text: String,

    /// Optional procedure/method hint for answering.
    #[serde(rename = "yordam", default)]
    pub method: Option<String>,
}

/// DTO for creating or replacing a question. The id is never client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuestionInput {
    #[serde(rename = "soru")]
    #[validate(length(min = 1, message = "Question text must not be empty."))]
    pub text: String,

    #[serde(rename = "yordam", default)]
    pub method: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub count: usize,
}

impl From<Vec<Question>> for QuestionsResponse {
    fn from(questions: Vec<Question>) -> Self {
        Self {
            count: questions.len(),
            questions,
        }
    }
}

/// Generic acknowledgement with the id of the affected resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default)]
    pub id: Option<String>,
}
