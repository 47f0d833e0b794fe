//! Structured logging infrastructure for the NDVI chart cycler

use crate::error::{NdviError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "ndvi_chart=trace"); `RUST_LOG` wins when set
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output instead of stdout
    pub file_path: Option<PathBuf>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Keeps the background log writer alive.
///
/// Dropping the guard flushes buffered file output, so hold it for the
/// lifetime of the process.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, worker, ansi) = match &config.file_path {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), None, true),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(ansi)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(ansi)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| NdviError::config(format!("Failed to install tracing subscriber: {e}")))?;

    tracing::info!(
        level = %config.level,
        format = ?config.format,
        destination = %config
            .file_path
            .as_deref()
            .map_or_else(|| "stdout".into(), |p| p.display().to_string()),
        "Logging initialized"
    );

    Ok(LoggingGuard { _worker: worker })
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| NdviError::validation_field("log path has no file name", "logging.file_path"))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((directory, PathBuf::from(file_name)))
}
