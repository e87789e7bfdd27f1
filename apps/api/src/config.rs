use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Enables `/process-cv-from-path`, which reads arbitrary server paths.
    pub allow_path_processing: bool,
    /// JSON vocabulary override; `None` uses the built-in vocabulary.
    pub vocabulary_path: Option<PathBuf>,
    /// Daily log files go here; `None` (LOG_DIR empty or "off") logs to stdout only.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so parsing is testable without
    /// touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            upload_dir: PathBuf::from(var("UPLOAD_DIR", "uploads")),
            output_dir: PathBuf::from(var("OUTPUT_DIR", "outputs")),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            allow_path_processing: parse_bool(&var("ALLOW_PATH_PROCESSING", "false"))
                .context("ALLOW_PATH_PROCESSING must be true or false")?,
            vocabulary_path: lookup("VOCABULARY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_dir: Some(var("LOG_DIR", "logs"))
                .filter(|d| !d.trim().is_empty() && !d.trim().eq_ignore_ascii_case("off"))
                .map(PathBuf::from),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised boolean '{other}'"),
    }
}
