//! Outbound persistence: extraction results as JSON files, plus the upload
//! directory holding incoming PDFs.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::extraction::ExtractionResult;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("result not found: {0}")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where a result ended up.
#[derive(Debug, Clone, Serialize)]
pub struct StoredResult {
    pub filename: String,
    pub location: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredResultInfo {
    pub filename: String,
    pub size: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn store(&self, name: &str, result: &ExtractionResult)
        -> Result<StoredResult, StorageError>;

    /// Raw JSON bytes of a stored result.
    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// All stored results, most recently modified first.
    async fn list(&self) -> Result<Vec<StoredResultInfo>, StorageError>;
}

/// Rejects anything that could address a file outside the store directory.
pub fn validate_file_name(name: &str) -> Result<&str, StorageError> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.chars().any(char::is_control);
    if invalid {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Result file name: `cv_extracted_<timestamp>_<8 hex>.json`.
pub fn result_file_name() -> String {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("cv_extracted_{stamp}_{}.json", &suffix[..8])
}

/// JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FsResultStore {
    dir: PathBuf,
}

impl FsResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn to_utc(time: std::io::Result<SystemTime>) -> Option<DateTime<Utc>> {
    time.ok().map(DateTime::<Utc>::from)
}

#[async_trait]
impl ResultStore for FsResultStore {
    async fn store(
        &self,
        name: &str,
        result: &ExtractionResult,
    ) -> Result<StoredResult, StorageError> {
        let name = validate_file_name(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let json = serde_json::to_vec_pretty(result)?;
        let location = self.dir.join(name);
        tokio::fs::write(&location, &json).await?;
        info!(path = %location.display(), bytes = json.len(), "Stored extraction result");

        Ok(StoredResult {
            filename: name.to_string(),
            location,
            size: json.len() as u64,
        })
    }

    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let name = validate_file_name(name)?;
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<StoredResultInfo>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut results = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let Some(modified) = to_utc(metadata.modified()) else {
                warn!(path = %path.display(), "No modification time, skipping");
                continue;
            };
            // Not every filesystem records creation time.
            let created = to_utc(metadata.created()).unwrap_or(modified);
            results.push(StoredResultInfo {
                filename: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                created,
                modified,
            });
        }

        results.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(results)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Uploads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SavedUpload {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Directory receiving uploaded PDFs.
#[derive(Debug, Clone)]
pub struct UploadDir {
    dir: PathBuf,
}

impl UploadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `cv_<timestamp>_<original name>`, keeping only the final path component
    /// of whatever the client sent. The result always passes
    /// `validate_file_name`, so `resolve` accepts it back.
    pub fn unique_name(original: &str) -> String {
        let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
        let mut base: String = base
            .chars()
            .map(|c| if c.is_control() { '_' } else { c })
            .collect();
        while base.contains("..") {
            base = base.replace("..", ".");
        }
        if base.is_empty() || base == "." {
            base = "upload.pdf".to_string();
        }
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        format!("cv_{stamp}_{base}")
    }

    pub async fn save(&self, original_name: &str, data: Bytes) -> Result<SavedUpload, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let filename = Self::unique_name(original_name);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, &data).await?;
        info!(path = %path.display(), bytes = data.len(), "Saved uploaded file");
        Ok(SavedUpload {
            filename,
            path,
            size: data.len() as u64,
        })
    }

    /// Maps a client-supplied path (as returned by upload, or a bare file
    /// name) onto a file inside this directory.
    pub fn resolve(&self, file_path: &str) -> Result<PathBuf, StorageError> {
        let name = Path::new(file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StorageError::InvalidName(file_path.to_string()))?;
        Ok(self.dir.join(validate_file_name(name)?))
    }
}
