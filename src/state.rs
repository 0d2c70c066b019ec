// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    error::AppError,
    services::{AnswerEngine, engine_from_config},
    storage::{pdfs::PdfStorage, questions::QuestionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionStore>,
    pub pdfs: PdfStorage,
    pub engine: Arc<dyn AnswerEngine>,
    pub config: Config,
}

impl AppState {
    /// Opens the data directory described by `config` and selects the answer engine.
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        let questions = QuestionStore::open(config.questions_path()).await?;
        let pdfs = PdfStorage::open(config.pdf_dir()).await?;
        let engine = engine_from_config(&config)?;

        Ok(Self {
            questions: Arc::new(questions),
            pdfs,
            engine,
            config,
        })
    }

    pub fn with_engine(mut self, engine: Arc<dyn AnswerEngine>) -> Self {
        self.engine = engine;
        self
    }
}

impl FromRef<AppState> for Arc<QuestionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for PdfStorage {
    fn from_ref(state: &AppState) -> Self {
        state.pdfs.clone()
    }
}

impl FromRef<AppState> for Arc<dyn AnswerEngine> {
    fn from_ref(state: &AppState) -> Self {
        state.engine.clone()
    }
}
