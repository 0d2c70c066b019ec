// src/services/mod.rs

pub mod external;
pub mod simulated;

use std::{path::Path, sync::Arc};

use async_trait::async_trait;

use crate::{
    config::Config,
    error::AppError,
    models::{process::ProcessResult, question::Question},
};

pub use external::ExternalEngine;
pub use simulated::SimulatedEngine;

/// Answers a batch of questions against one stored PDF.
#[async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Returns one result per question, in the same order.
    async fn answer(
        &self,
        questions: &[Question],
        pdf_path: &Path,
    ) -> Result<Vec<ProcessResult>, AppError>;
}

/// Picks the external service when one is configured, otherwise simulated answers.
pub fn engine_from_config(config: &Config) -> Result<Arc<dyn AnswerEngine>, AppError> {
    match &config.external_service_url {
        Some(url) => {
            tracing::info!("Answering questions via external service at {}", url);
            Ok(Arc::new(ExternalEngine::new(
                url.as_str(),
                config.external_service_timeout,
            )?))
        }
        None => {
            tracing::info!("EXTERNAL_SERVICE_URL not set, answering with simulated results");
            Ok(Arc::new(SimulatedEngine::default()))
        }
    }
}
