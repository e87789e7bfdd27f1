use std::sync::Arc;

use crate::config::Config;
use crate::extraction::CvExtractor;
use crate::pdf::TextSource;
use crate::storage::{ResultStore, UploadDir};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<CvExtractor>,
    /// Pluggable PDF decoder. Default: `PdfTextSource` (pdf-extract).
    pub text_source: Arc<dyn TextSource>,
    /// Pluggable result persistence. Default: `FsResultStore` over `OUTPUT_DIR`.
    pub results: Arc<dyn ResultStore>,
    pub uploads: UploadDir,
}
