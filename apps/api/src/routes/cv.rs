//! Axum route handlers for upload, processing and result retrieval.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::processing::{process_document, ProcessResponse};
use crate::state::AppState;
use crate::storage::{validate_file_name, StoredResultInfo};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub file_path: String,
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct ProcessCvForm {
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ProcessPathForm {
    pub pdf_path: String,
}

#[derive(Debug, Serialize)]
pub struct ListResultsResponse {
    pub results: Vec<StoredResultInfo>,
    pub count: usize,
}

fn is_pdf_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the size limit".to_string())
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}

async fn ensure_exists(path: &FsPath) -> Result<(), AppError> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::NotFound(format!("File not found: {}", path.display()))),
        Err(e) => Err(AppError::Internal(e.into())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload-cv
///
/// Multipart upload; the PDF goes in the `file` field.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        info!(filename = %original, "Receiving upload");
        if !is_pdf_name(&original) {
            return Err(AppError::Validation("Only PDF files are accepted".to_string()));
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        let limit = state.config.max_upload_bytes;
        if data.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "File is too large (max {} MB)",
                limit / (1024 * 1024)
            )));
        }

        let saved = state.uploads.save(&original, data).await?;
        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: saved.filename,
            file_path: saved.path.display().to_string(),
            size: saved.size,
        }));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}

/// POST /process-cv
///
/// Processes a previously uploaded PDF. `file_path` is resolved inside the
/// upload directory.
pub async fn handle_process_cv(
    State(state): State<AppState>,
    Form(form): Form<ProcessCvForm>,
) -> Result<Json<ProcessResponse>, AppError> {
    let path = state.uploads.resolve(&form.file_path)?;
    ensure_exists(&path).await?;
    if !is_pdf_name(&form.file_path) {
        return Err(AppError::Validation("The file must be a PDF".to_string()));
    }

    let response = process_document(&state, &path).await?;
    Ok(Json(response))
}

/// POST /process-cv-from-path
///
/// Processes any PDF readable by the server. Disabled unless
/// `ALLOW_PATH_PROCESSING` is set.
pub async fn handle_process_from_path(
    State(state): State<AppState>,
    Form(form): Form<ProcessPathForm>,
) -> Result<Json<ProcessResponse>, AppError> {
    if !state.config.allow_path_processing {
        return Err(AppError::Forbidden(
            "Processing arbitrary paths is disabled".to_string(),
        ));
    }

    let path = PathBuf::from(&form.pdf_path);
    ensure_exists(&path).await?;

    let response = process_document(&state, &path).await?;
    Ok(Json(response))
}

/// GET /download-result/:filename
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let filename = validate_file_name(&filename)?;
    let bytes = state.results.load(filename).await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// GET /list-results
pub async fn handle_list_results(
    State(state): State<AppState>,
) -> Result<Json<ListResultsResponse>, AppError> {
    let results = state.results.list().await?;
    Ok(Json(ListResultsResponse {
        count: results.len(),
        results,
    }))
}
