//! Error types for the exchange rate aggregator.

/// Domain-level errors surfaced by the aggregator and its façade.
#[derive(Debug, thiserror::Error)]
pub enum RatesError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ProviderUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RatesError {
    pub fn missing_parameter(name: &str) -> Self {
        RatesError::InvalidArgument(format!("Missing required parameter: {}", name))
    }
}

/// A single upstream call failure.
///
/// Always recovered inside the aggregator; never reaches a caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Decode(err.to_string())
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RatesError> for AppError {
    fn from(err: RatesError) -> Self {
        match err {
            RatesError::InvalidArgument(msg) => AppError::BadRequest(msg),
            RatesError::ProviderUnavailable(msg) => AppError::ServiceUnavailable(msg),
            RatesError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
