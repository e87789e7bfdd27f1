pub mod cv;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Multipart framing overhead allowed on top of the configured file size.
const UPLOAD_ENVELOPE_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + UPLOAD_ENVELOPE_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/upload-cv", post(cv::handle_upload))
        .route("/process-cv", post(cv::handle_process_cv))
        .route("/process-cv-from-path", post(cv::handle_process_from_path))
        .route("/download-result/:filename", get(cv::handle_download))
        .route("/list-results", get(cv::handle_list_results))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
