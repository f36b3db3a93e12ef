//! Shared provider types and errors.

use std::fmt;

/// Errors raised by the HTTP layer beneath every provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Transport failure or a non-success HTTP status.
    HttpError(String),

    /// The service answered, but the body could not be understood.
    InvalidResponse(String),

    /// The configured endpoint is not a valid URL.
    InvalidUrl(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(e.to_string())
    }
}

/// Builds a request URL from an endpoint and query parameters.
///
/// Parameter values are percent-encoded, so free text such as an address
/// or a JSON document can be passed as-is.
pub(crate) fn build_url(endpoint: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
    reqwest::Url::parse_with_params(endpoint, params)
        .map(String::from)
        .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", endpoint, e)))
}
