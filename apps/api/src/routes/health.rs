use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service banner with the endpoint map.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "CV Processing API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "upload": "/upload-cv",
            "process": "/process-cv",
            "process_from_path": "/process-cv-from-path",
            "download": "/download-result/{filename}",
            "list_results": "/list-results"
        }
    }))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "services": {
            "cv_processor": "available",
            "ai_extractor": "available",
            "file_handler": "available"
        }
    }))
}
