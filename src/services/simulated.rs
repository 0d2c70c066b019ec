// src/services/simulated.rs

use std::{ops::RangeInclusive, path::Path, time::Duration};

use async_trait::async_trait;
use rand::{Rng, seq::SliceRandom};

use super::AnswerEngine;
use crate::{
    error::AppError,
    models::{
        process::{AnswerStatus, ProcessResult},
        question::Question,
    },
};

const CANNED_ANSWERS: [&str; 10] = [
    "This is a sample answer for the question.",
    "Based on the document, the answer is provided here.",
    "The analysis shows that this is the correct response.",
    "According to the text, this is the solution.",
    "The document indicates this as the answer.",
    "This is the result of processing the question.",
    "The answer has been extracted from the document.",
    "Here is the response based on the analysis.",
    "The text suggests this as the answer.",
    "This is the conclusion drawn from the document.",
];

/// Stand-in engine used when no answering service is configured.
/// Waits a random delay per question and returns a canned answer.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    delay_ms: RangeInclusive<u64>,
}

impl SimulatedEngine {
    pub fn new(delay_ms: RangeInclusive<u64>) -> Self {
        Self { delay_ms }
    }

    /// No artificial delay.
    pub fn instant() -> Self {
        Self::new(0..=0)
    }
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new(1_000..=3_000)
    }
}

#[async_trait]
impl AnswerEngine for SimulatedEngine {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn answer(
        &self,
        questions: &[Question],
        pdf_path: &Path,
    ) -> Result<Vec<ProcessResult>, AppError> {
        tracing::debug!(
            "Simulating {} answers for {}",
            questions.len(),
            pdf_path.display()
        );

        let mut results = Vec::with_capacity(questions.len());
        for question in questions {
            // ThreadRng is !Send, keep it out of the await below.
            let (delay, answer, status) = {
                let mut rng = rand::thread_rng();
                let delay = rng.gen_range(self.delay_ms.clone());
                let answer = CANNED_ANSWERS
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(CANNED_ANSWERS[0]);
                let status = if rng.gen_bool(0.5) {
                    AnswerStatus::Found
                } else {
                    AnswerStatus::NotFound
                };
                (delay, answer, status)
            };

            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            results.push(ProcessResult {
                question: question.text.clone(),
                answer: answer.to_string(),
                status,
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_result_per_question_in_order() {
        let questions: Vec<Question> = ["First?", "Second?", "Third?"]
            .iter()
            .enumerate()
            .map(|(i, text)| Question {
                id: i.to_string(),
                text: text.to_string(),
                method: None,
            })
            .collect();

        let results = SimulatedEngine::instant()
            .answer(&questions, Path::new("doc.pdf"))
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        for (result, question) in results.iter().zip(&questions) {
            assert_eq!(result.question, question.text);
            assert!(CANNED_ANSWERS.contains(&result.answer.as_str()));
        }
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let results = SimulatedEngine::instant()
            .answer(&[], Path::new("doc.pdf"))
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
