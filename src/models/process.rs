// src/models/process.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessRequest {
    /// Ids of the questions to answer, in the order results should come back.
    pub question_ids: Vec<String>,
    /// Name of a stored PDF.
    pub pdf_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AnswerStatus {
    #[serde(rename = "answer_found")]
    Found,
    #[serde(rename = "answer_notfound")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessResult {
    /// The question text.
    pub question: String,
    pub answer: String,
    pub status: AnswerStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    pub results: Vec<ProcessResult>,
    pub count: usize,
}

impl From<Vec<ProcessResult>> for ProcessResponse {
    fn from(results: Vec<ProcessResult>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Question as sent to the answering service: the text and method only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub soru: String,
    pub yordam: Option<String>,
}

impl From<&Question> for QuestionPayload {
    fn from(q: &Question) -> Self {
        Self {
            soru: q.text.clone(),
            yordam: q.method.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&AnswerStatus::Found).unwrap(),
            r#""answer_found""#
        );
        assert_eq!(
            serde_json::to_string(&AnswerStatus::NotFound).unwrap(),
            r#""answer_notfound""#
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let raw = r#"{"question":"q","answer":"a","status":"maybe"}"#;
        assert!(serde_json::from_str::<ProcessResult>(raw).is_err());
    }
}
