//! CLI error type.

use std::fmt;

use routelab::app::AppError;
use routelab::config::{ConfigFileError, ConfigKeyError};
use routelab::logging::LoggingError;
use routelab::polyline::PolylineError;
use routelab::provider::ProviderError;

/// Errors reported by CLI commands. Each prints as a single line.
#[derive(Debug)]
pub enum CliError {
    /// Bad or missing configuration.
    Config(String),
    /// Bad command-line input.
    InvalidArgument(String),
    /// The route pipeline failed.
    Route(AppError),
    /// Polyline encoding or decoding failed.
    Polyline(PolylineError),
    /// HTTP client setup failed.
    Provider(ProviderError),
    /// Logging could not be initialized.
    Logging(LoggingError),
    /// Writing output failed.
    Io(std::io::Error),
    /// Serializing output failed.
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Route(e) => write!(f, "{}", e),
            CliError::Polyline(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::Route(e)
    }
}

impl From<PolylineError> for CliError {
    fn from(e: PolylineError) -> Self {
        CliError::Polyline(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ConfigKeyError> for CliError {
    fn from(e: ConfigKeyError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
