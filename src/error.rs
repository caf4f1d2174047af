// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each error variant tells the story of what went wrong and where. The
//! split that matters operationally: configuration errors abort the run
//! before any row is touched, everything else stays scoped to a single row.

use std::fmt;
use thiserror::Error;

/// OpenAI API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limit_exceeded"`,
/// the provider's failure vocabulary is encoded in the type system. Each
/// variant tells you exactly what the API reported and whether the batch
/// loop should retry the call or give the row up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Request rate limit exceeded — back off and retry
    RateLimited,
    /// Account ran out of credit; retrying cannot help
    QuotaExhausted,
    /// API key is invalid or expired
    Unauthorized,
    /// The requested model does not exist or is inaccessible
    ModelNotFound,
    /// Request failed the provider's validation
    InvalidRequest,
    /// Provider internal server error
    InternalError,
    /// Provider is temporarily overloaded
    Overloaded,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl ApiErrorCode {
    /// Parse a provider error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limit_exceeded" => Self::RateLimited,
            "insufficient_quota" => Self::QuotaExhausted,
            "invalid_api_key" => Self::Unauthorized,
            "model_not_found" => Self::ModelNotFound,
            "invalid_request_error" => Self::InvalidRequest,
            "server_error" => Self::InternalError,
            "overloaded" => Self::Overloaded,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::InternalError | Self::Overloaded => true,
            Self::HttpStatus(status) => *status >= 500,
            _ => false,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limit_exceeded"),
            Self::QuotaExhausted => write!(f, "insufficient_quota"),
            Self::Unauthorized => write!(f, "invalid_api_key"),
            Self::ModelNotFound => write!(f, "model_not_found"),
            Self::InvalidRequest => write!(f, "invalid_request_error"),
            Self::InternalError => write!(f, "server_error"),
            Self::Overloaded => write!(f, "overloaded"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Prompt template not found at {path}: {source}")]
    PromptTemplateNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("OpenAI API returned an error ({code}): {message}")]
    OpenAiService {
        code: ApiErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input table is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Checkpoint write failed for row {row}: {cause}")]
    CheckpointFailed { row: usize, cause: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether the batch loop should retry the call that produced this error.
    ///
    /// Transport-level failures are retried alongside retryable provider
    /// codes; everything else fails the row on the first attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NetworkFailure(_) => true,
            Self::OpenAiService { code, .. } => code.is_retryable(),
            _ => false,
        }
    }
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_into_typed_vocabulary() {
        assert_eq!(
            ApiErrorCode::from_api_response("rate_limit_exceeded"),
            ApiErrorCode::RateLimited
        );
        assert_eq!(
            ApiErrorCode::from_api_response("insufficient_quota"),
            ApiErrorCode::QuotaExhausted
        );
        assert_eq!(
            ApiErrorCode::from_api_response("something_new"),
            ApiErrorCode::Unknown("something_new".to_string())
        );
    }

    #[test]
    fn retryability_follows_the_code() {
        assert!(ApiErrorCode::RateLimited.is_retryable());
        assert!(ApiErrorCode::HttpStatus(503).is_retryable());
        assert!(!ApiErrorCode::HttpStatus(404).is_retryable());
        assert!(!ApiErrorCode::QuotaExhausted.is_retryable());
        assert!(!ApiErrorCode::Unauthorized.is_retryable());
    }
}
