//! Logging setup.
//!
//! Installs a `tracing` subscriber with two outputs:
//! - stderr, compact, for interactive use
//! - a daily-rotated file `routelab.log` in the configured directory
//!
//! `RUST_LOG` overrides the configured level when set.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file name prefix.
pub const LOG_FILE_NAME: &str = "routelab.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the file writer flushing. Drop it only at exit.
#[must_use = "logs are lost if the guard is dropped early"]
pub struct LoggingGuard {
    _file: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Log file path before the date suffix the daily rotation appends.
    pub fn log_file(&self) -> &Path {
        &self.path
    }
}

/// Builds the filter from `RUST_LOG`, falling back to `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
        filter: level.to_string(),
        message: e.to_string(),
    })
}

/// Installs the global subscriber.
pub fn init_logging(directory: &Path, level: &str) -> Result<LoggingGuard, LoggingError> {
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::CreateDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let filter = build_filter(level)?;
    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        _file: guard,
        path: directory.join(LOG_FILE_NAME),
    })
}
