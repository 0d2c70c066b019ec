// src/storage/questions.rs

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{Question, QuestionInput},
};

/// JSON-file-backed question repository.
///
/// The file holds a single array. Entries are kept as raw JSON so that a
/// malformed record never gets rewritten or dropped by an unrelated update;
/// it only surfaces as an error when read.
#[derive(Debug)]
pub struct QuestionStore {
    path: PathBuf,
    /// Serializes every read-modify-write cycle on the file.
    lock: Mutex<()>,
}

impl QuestionStore {
    /// Opens the store, creating the parent directory and an empty `[]` file if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, "[]").await?;
            tracing::info!("Created empty question store at {}", path.display());
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Result<Vec<Question>, AppError> {
        let _guard = self.lock.lock().await;
        read_entries(&self.path)
            .await?
            .into_iter()
            .map(parse_question)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Question, AppError> {
        let _guard = self.lock.lock().await;
        read_entries(&self.path)
            .await?
            .into_iter()
            .find(|entry| entry_id(entry) == Some(id))
            .map(parse_question)
            .unwrap_or_else(|| Err(question_not_found()))
    }

    /// Resolves `ids` in request order. The first unknown id aborts the lookup.
    pub async fn find_many(&self, ids: &[String]) -> Result<Vec<Question>, AppError> {
        let _guard = self.lock.lock().await;
        let entries = read_entries(&self.path).await?;

        ids.iter()
            .map(|id| {
                entries
                    .iter()
                    .find(|entry| entry_id(entry) == Some(id.as_str()))
                    .cloned()
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Question with ID '{}' not found", id))
                    })
                    .and_then(parse_question)
            })
            .collect()
    }

    pub async fn create(&self, input: QuestionInput) -> Result<Question, AppError> {
        input.validate()?;

        let question = Question {
            id: Uuid::new_v4().to_string(),
            text: input.text,
            method: input.method,
        };

        let _guard = self.lock.lock().await;
        let mut entries = read_entries(&self.path).await?;
        entries.push(serde_json::to_value(&question)?);
        write_entries(&self.path, &entries).await?;

        tracing::debug!("Created question {}", question.id);
        Ok(question)
    }

    /// Replaces text and method of an existing question, keeping its id and position.
    pub async fn update(&self, id: &str, input: QuestionInput) -> Result<Question, AppError> {
        input.validate()?;

        let _guard = self.lock.lock().await;
        let mut entries = read_entries(&self.path).await?;
        let slot = entries
            .iter_mut()
            .find(|entry| entry_id(entry) == Some(id))
            .ok_or_else(question_not_found)?;

        let question = Question {
            id: id.to_string(),
            text: input.text,
            method: input.method,
        };
        *slot = serde_json::to_value(&question)?;
        write_entries(&self.path, &entries).await?;

        Ok(question)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut entries = read_entries(&self.path).await?;
        let before = entries.len();
        entries.retain(|entry| entry_id(entry) != Some(id));

        if entries.len() == before {
            return Err(question_not_found());
        }

        write_entries(&self.path, &entries).await?;
        tracing::debug!("Deleted question {}", id);
        Ok(())
    }
}

fn question_not_found() -> AppError {
    AppError::NotFound("Question not found".to_string())
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn parse_question(entry: Value) -> Result<Question, AppError> {
    let question: Question = serde_json::from_value(entry)
        .map_err(|e| AppError::InternalServerError(format!("Invalid question data: {}", e)))?;
    question
        .validate()
        .map_err(|e| AppError::InternalServerError(format!("Invalid question data: {}", e)))?;
    Ok(question)
}

/// Missing, unparsable or non-array files read as an empty dataset.
async fn read_entries(path: &Path) -> Result<Vec<Value>, AppError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(AppError::InternalServerError(format!(
                "Error loading questions: {}",
                e
            )));
        }
    };

    match serde_json::from_slice::<Value>(&raw) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(_) => {
            tracing::warn!("{} does not hold a JSON array, treating as empty", path.display());
            Ok(Vec::new())
        }
        Err(e) => {
            tracing::warn!("Failed to parse {}: {}, treating as empty", path.display(), e);
            Ok(Vec::new())
        }
    }
}

/// Writes pretty JSON to a sibling temp file, then renames it over the target.
async fn write_entries(path: &Path, entries: &[Value]) -> Result<(), AppError> {
    let body = serde_json::to_vec_pretty(entries)
        .map_err(|e| AppError::InternalServerError(format!("Error saving questions: {}", e)))?;

    let tmp = path.with_extension("json.tmp");
    let result = async {
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    result.map_err(|e| AppError::InternalServerError(format!("Error saving questions: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn input(text: &str, method: Option<&str>) -> QuestionInput {
        QuestionInput {
            text: text.to_string(),
            method: method.map(str::to_string),
        }
    }

    async fn store_in(dir: &tempfile::TempDir) -> QuestionStore {
        QuestionStore::open(dir.path().join("questions.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_creates_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuestionStore::open(dir.path().join("nested/questions.json"))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "[]");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn crud_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        let first = store.create(input("Birinci?", Some("özet"))).await.unwrap();
        let second = store.create(input("İkinci?", None)).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.get(&first.id).await.unwrap(), first);

        let updated = store
            .update(&first.id, input("Birinci (yeni)?", None))
            .await
            .unwrap();
        assert_eq!(updated.id, first.id);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![updated.clone(), second.clone()]);

        store.delete(&first.id).await.unwrap();
        assert!(matches!(
            store.get(&first.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(&first.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn writes_pretty_json_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        store.create(input("Şehir nerede?", None)).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("Şehir nerede?"));
        assert!(raw.contains("\n  {"));
    }

    #[tokio::test]
    async fn corrupt_or_non_array_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.list().await.unwrap().is_empty());

        std::fs::write(store.path(), r#"{"id": "x"}"#).unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_record_is_an_internal_error_but_survives_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        std::fs::write(
            store.path(),
            r#"[{"id": "bad", "soru": ""}, {"id": "ok", "soru": "Fine?", "yordam": null}]"#,
        )
        .unwrap();

        assert!(matches!(
            store.list().await,
            Err(AppError::InternalServerError(_))
        ));

        store.update("ok", input("Still fine?", None)).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#""id": "bad""#));
    }

    #[tokio::test]
    async fn find_many_preserves_order_and_reports_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        let a = store.create(input("A?", None)).await.unwrap();
        let b = store.create(input("B?", None)).await.unwrap();

        let found = store
            .find_many(&[b.id.clone(), a.id.clone()])
            .await
            .unwrap();
        assert_eq!(found, vec![b.clone(), a.clone()]);

        match store.find_many(&[a.id.clone(), "missing".into()]).await {
            Err(AppError::NotFound(msg)) => {
                assert_eq!(msg, "Question with ID 'missing' not found")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        assert!(matches!(
            store.create(input("", None)).await,
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_creates_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir).await);

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(input(&format!("Q{}?", i), None)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.unwrap().len(), 20);
    }
}
