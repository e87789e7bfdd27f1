//! Tracing setup: stdout, plus a full log and an error-only log rotated daily
//! under `LOG_DIR`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::Config;

pub const LOG_FILE_PREFIX: &str = "cv_processing";
pub const ERROR_LOG_FILE_PREFIX: &str = "cv_processing_errors";
const KEPT_LOG_FILES: usize = 5;

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn daily_appender(dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(KEPT_LOG_FILES)
        .build(dir)
        .with_context(|| format!("creating log files in {}", dir.display()))
}

/// Both file layers. Pending lines are flushed when the guards drop, so the
/// caller keeps them alive for as long as it logs.
pub fn file_layers<S>(dir: &Path) -> Result<(BoxedLayer<S>, Vec<WorkerGuard>)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
{
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let (all_writer, all_guard) =
        tracing_appender::non_blocking(daily_appender(dir, LOG_FILE_PREFIX)?);
    let (error_writer, error_guard) =
        tracing_appender::non_blocking(daily_appender(dir, ERROR_LOG_FILE_PREFIX)?);

    let all = fmt::layer().with_ansi(false).with_writer(all_writer);
    let errors = fmt::layer()
        .with_ansi(false)
        .with_writer(error_writer)
        .with_filter(LevelFilter::ERROR);

    Ok((all.and_then(errors).boxed(), vec![all_guard, error_guard]))
}

/// Installs the global subscriber. Returns the file writer guards.
pub fn init(config: &Config) -> Result<Vec<WorkerGuard>> {
    let (files, guards) = match &config.log_dir {
        Some(dir) => {
            let (layer, guards) = file_layers(dir)?;
            (Some(layer), guards)
        }
        None => (None, Vec::new()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(fmt::layer())
        .with(files)
        .init();

    Ok(guards)
}
