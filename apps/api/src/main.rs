mod config;
mod errors;
mod extraction;
mod pdf;
mod processing;
mod routes;
mod state;
mod storage;
mod telemetry;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span};

use crate::config::Config;
use crate::extraction::{CvExtractor, Vocabulary};
use crate::pdf::PdfTextSource;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FsResultStore, UploadDir};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed env vars abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging (stdout plus rolling files under LOG_DIR)
    let _log_guards = telemetry::init(&config)?;

    info!("Starting CV API v{}", env!("CARGO_PKG_VERSION"));

    // Working directories
    for dir in [&config.upload_dir, &config.output_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    info!(
        uploads = %config.upload_dir.display(),
        outputs = %config.output_dir.display(),
        "Working directories ready"
    );

    // Vocabulary: built-in unless overridden by a JSON file
    let vocabulary = match &config.vocabulary_path {
        Some(path) => {
            info!("Loading vocabulary from {}", path.display());
            Vocabulary::from_json_file(path)?
        }
        None => Vocabulary::default(),
    };
    let extractor = CvExtractor::new(&vocabulary, info_span!("cv_extractor"))?;

    if config.allow_path_processing {
        tracing::warn!("/process-cv-from-path is enabled; any readable server path can be processed");
    }

    // Build app state
    let state = AppState {
        extractor: Arc::new(extractor),
        text_source: Arc::new(PdfTextSource),
        results: Arc::new(FsResultStore::new(config.output_dir.clone())),
        uploads: UploadDir::new(config.upload_dir.clone()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
