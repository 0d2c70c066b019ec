// src/services/external.rs

use std::{path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::AnswerEngine;
use crate::{
    error::AppError,
    models::{
        process::{ProcessResponse, ProcessResult, QuestionPayload},
        question::Question,
    },
};

/// Client for a remote answering service exposing `POST /process`.
///
/// The request is `multipart/form-data` with two fields:
/// * `pdf_file`: the PDF bytes (`application/pdf`).
/// * `questions`: a JSON array of `{"soru", "yordam"}` objects.
///
/// The response body is a [`ProcessResponse`].
#[derive(Debug, Clone)]
pub struct ExternalEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl ExternalEngine {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/process", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerEngine for ExternalEngine {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn answer(
        &self,
        questions: &[Question],
        pdf_path: &Path,
    ) -> Result<Vec<ProcessResult>, AppError> {
        let contents = match tokio::fs::read(pdf_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "PDF file not found: {}",
                    pdf_path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let file_name = pdf_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        let payload: Vec<QuestionPayload> = questions.iter().map(QuestionPayload::from).collect();
        let questions_json = serde_json::to_string(&payload)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let pdf_part = Part::bytes(contents)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("pdf_file", pdf_part)
            .text("questions", questions_json);

        tracing::info!(
            "Sending {} questions to {}",
            questions.len(),
            self.endpoint
        );

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BadGateway(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: ProcessResponse = response.json().await?;
        Ok(parsed.results)
    }
}
