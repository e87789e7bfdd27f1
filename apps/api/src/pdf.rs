//! Inbound text capability: turns a stored PDF into raw text.
//!
//! `AppState` holds an `Arc<dyn TextSource>` so tests and other decoders can
//! stand in for `pdf-extract`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExtractionFault {
    #[error("PDF not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode PDF text: {0}")]
    Decode(String),
}

#[async_trait]
pub trait TextSource: Send + Sync {
    /// Raw text of the document. Whitespace-only text is `Ok`; whether that is
    /// acceptable is the caller's decision.
    async fn get_text(&self, path: &Path) -> Result<String, ExtractionFault>;
}

/// `pdf-extract` backed source. Decoding is CPU-bound and runs on the
/// blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

#[async_trait]
impl TextSource for PdfTextSource {
    async fn get_text(&self, path: &Path) -> Result<String, ExtractionFault> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExtractionFault::NotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(ExtractionFault::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        info!(path = %path.display(), bytes = bytes.len(), "Extracting text from PDF");

        // pdf-extract can panic on malformed files; a panic surfaces here as a JoinError.
        let decoded = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionFault::Decode(format!("decoder aborted: {e}")))?;

        let text = decoded.map_err(|e| ExtractionFault::Decode(e.to_string()))?;
        if text.trim().is_empty() {
            warn!(path = %path.display(), "PDF decoded but contains no text");
        } else {
            info!(chars = text.chars().count(), "PDF text extracted");
        }
        Ok(text)
    }
}
