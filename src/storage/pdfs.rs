// src/storage/pdfs.rs

use std::path::{Path, PathBuf};

use tokio::{fs, io::AsyncWriteExt};

use crate::{
    error::AppError,
    utils::filename::{ensure_plain_filename, is_pdf_name, validate_pdf_filename},
};

/// A directory of uploaded PDF files, addressed by file name.
#[derive(Debug, Clone)]
pub struct PdfStorage {
    dir: PathBuf,
}

impl PdfStorage {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the stored PDFs, sorted.
    pub async fn list(&self) -> Result<Vec<String>, AppError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str().filter(|n| is_pdf_name(n)) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Stores `contents` under the validated base name of `filename`.
    /// Never overwrites: an existing file is a conflict.
    pub async fn store(&self, filename: &str, contents: &[u8]) -> Result<String, AppError> {
        let name = validate_pdf_filename(filename)?;
        let path = self.dir.join(&name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => already_exists(&name),
                _ => AppError::InternalServerError(format!("Error uploading file: {}", e)),
            })?;

        let written = async {
            file.write_all(contents).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // Do not leave a truncated file behind to block a retry.
            let _ = fs::remove_file(&path).await;
            return Err(AppError::InternalServerError(format!(
                "Error uploading file: {}",
                e
            )));
        }

        tracing::info!("Stored PDF '{}' ({} bytes)", name, contents.len());
        Ok(name)
    }

    /// Fails fast with 409 before an upload body is read.
    pub async fn ensure_absent(&self, filename: &str) -> Result<String, AppError> {
        let name = validate_pdf_filename(filename)?;
        if fs::try_exists(self.dir.join(&name)).await? {
            return Err(already_exists(&name));
        }
        Ok(name)
    }

    /// Path of a stored file for download. The raw name must not contain path parts.
    pub async fn locate(&self, filename: &str) -> Result<PathBuf, AppError> {
        let name = ensure_plain_filename(filename)?;
        let path = self.dir.join(name);
        if !is_regular_file(&path).await {
            return Err(AppError::NotFound("PDF not found.".to_string()));
        }
        Ok(path)
    }

    /// Path of a stored PDF referenced by a processing request.
    pub async fn resolve(&self, filename: &str) -> Result<PathBuf, AppError> {
        let name = validate_pdf_filename(filename)?;
        let path = self.dir.join(&name);
        if !is_regular_file(&path).await {
            return Err(AppError::NotFound(format!("PDF file '{}' not found", name)));
        }
        Ok(path)
    }

    /// Removes a stored PDF. Like `locate`, the raw name must already be a plain
    /// file name; it is never reduced to its base name.
    pub async fn delete(&self, filename: &str) -> Result<String, AppError> {
        let name = ensure_plain_filename(filename)?;
        if !is_pdf_name(name) {
            return Err(AppError::BadRequest("Only PDF files are allowed.".to_string()));
        }
        match fs::remove_file(self.dir.join(name)).await {
            Ok(()) => {
                tracing::info!("Deleted PDF '{}'", name);
                Ok(name.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("PDF not found.".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn already_exists(name: &str) -> AppError {
    AppError::Conflict(format!(
        "File '{}' already exists. Please rename the file or delete the existing one.",
        name
    ))
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage(dir: &tempfile::TempDir) -> PdfStorage {
        PdfStorage::open(dir.path().join("pdfs")).await.unwrap()
    }

    #[tokio::test]
    async fn list_only_returns_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = storage(&dir).await;
        std::fs::write(pdfs.dir().join("b.pdf"), b"%PDF-1.4").unwrap();
        std::fs::write(pdfs.dir().join("A.PDF"), b"%PDF-1.4").unwrap();
        std::fs::write(pdfs.dir().join("notes.txt"), b"text").unwrap();
        std::fs::create_dir(pdfs.dir().join("folder.pdf")).unwrap();

        assert_eq!(pdfs.list().await.unwrap(), vec!["A.PDF", "b.pdf"]);
    }

    #[tokio::test]
    async fn store_refuses_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = storage(&dir).await;

        let name = pdfs.store("nested/doc.pdf", b"first").await.unwrap();
        assert_eq!(name, "doc.pdf");

        match pdfs.store("doc.pdf", b"second").await {
            Err(AppError::Conflict(msg)) => assert!(msg.starts_with("File 'doc.pdf' already exists")),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            pdfs.ensure_absent("doc.pdf").await,
            Err(AppError::Conflict(_))
        ));
        assert_eq!(std::fs::read(pdfs.dir().join("doc.pdf")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn locate_and_resolve_report_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = storage(&dir).await;
        pdfs.store("here.pdf", b"x").await.unwrap();

        assert!(pdfs.locate("here.pdf").await.is_ok());
        assert!(matches!(pdfs.locate("gone.pdf").await, Err(AppError::NotFound(_))));
        assert!(matches!(pdfs.locate("../here.pdf").await, Err(AppError::BadRequest(_))));

        assert!(pdfs.resolve("here.pdf").await.is_ok());
        match pdfs.resolve("gone.pdf").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "PDF file 'gone.pdf' not found"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(pdfs.resolve("here.txt").await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = storage(&dir).await;
        pdfs.store("old.pdf", b"x").await.unwrap();

        assert_eq!(pdfs.delete("old.pdf").await.unwrap(), "old.pdf");
        assert!(pdfs.list().await.unwrap().is_empty());
        assert!(matches!(pdfs.delete("old.pdf").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_never_strips_path_parts() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = storage(&dir).await;
        pdfs.store("keep.pdf", b"x").await.unwrap();

        for name in ["sub\\keep.pdf", "sub/keep.pdf", "../pdfs/keep.pdf", "keep.txt"] {
            assert!(
                matches!(pdfs.delete(name).await, Err(AppError::BadRequest(_))),
                "{name} should be refused"
            );
        }
        assert_eq!(pdfs.list().await.unwrap(), vec!["keep.pdf"]);
    }
}
