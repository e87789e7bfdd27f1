//! Document pipeline: PDF text → normalize/extract → persist.
//!
//! The two I/O boundaries (decoding and storage) are the only await points;
//! extraction itself runs to completion on the blocking pool.

use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use serde::Serialize;
use tracing::{info, info_span, Instrument};

use crate::errors::AppError;
use crate::extraction::models::{ContactInfo, ExtractionMetadata, PersonalInfo};
use crate::extraction::{CvExtractor, ExtractionResult};
use crate::state::AppState;
use crate::storage::result_file_name;

/// Headline counts returned to the caller; the full result is downloadable.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedInfoSummary {
    pub personal_info: PersonalInfo,
    pub contact_info: ContactInfo,
    pub skills_count: usize,
    pub experience_count: usize,
    pub education_count: usize,
}

impl From<&ExtractionResult> for ExtractedInfoSummary {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            personal_info: result.personal_info.clone(),
            contact_info: result.contact_info.clone(),
            skills_count: result.skills.len(),
            experience_count: result.work_experience.len(),
            education_count: result.education.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub input_file: String,
    pub output_file: String,
    pub extracted_info: ExtractedInfoSummary,
    pub metadata: ExtractionMetadata,
}

/// Runs the extractor off the async scheduler.
pub async fn extract_blocking(
    extractor: Arc<CvExtractor>,
    raw_text: String,
) -> Result<ExtractionResult, AppError> {
    tokio::task::spawn_blocking(move || extractor.extract_raw(&raw_text))
        .await
        .map_err(|e| AppError::Internal(anyhow!("extraction task failed: {e}")))
}

/// Processes one PDF end to end. A document with text but few recognisable
/// fields is still a success; a document with no text at all is not.
pub async fn process_document(state: &AppState, path: &Path) -> Result<ProcessResponse, AppError> {
    let span = info_span!("process_document", path = %path.display());
    run_pipeline(state, path).instrument(span).await
}

async fn run_pipeline(state: &AppState, path: &Path) -> Result<ProcessResponse, AppError> {
    info!("Processing CV");
    let raw_text = state.text_source.get_text(path).await?;
    if raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract any text from the PDF".to_string(),
        ));
    }

    let result = extract_blocking(state.extractor.clone(), raw_text).await?;

    let stored = state.results.store(&result_file_name(), &result).await?;
    info!(
        output = %stored.location.display(),
        confidence = result.extraction_metadata.confidence_score,
        "CV processed"
    );

    Ok(ProcessResponse {
        message: "CV processed successfully".to_string(),
        input_file: path.display().to_string(),
        output_file: stored.filename,
        extracted_info: ExtractedInfoSummary::from(&result),
        metadata: result.extraction_metadata,
    })
}
