// src/error.rs
// =============================================================================
// Error type for the checker core.
//
// Per-URL failures are never errors: they become status 0 inside the
// verifier. What remains here are structural and whole-batch failures:
// - InvalidInput: the request was not a list of URLs (HTTP 400)
// - Internal: a batch could not be processed (HTTP 500)
// - Service / Transport: a chunk never reached, or was rejected by, the
//   verifier service
// - Io / Json / Pdf / Config: reading inputs and configuration
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    /// The request body is not `{ "urls": [string, ...] }`.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure while verifying a batch.
    #[error("internal error: {0}")]
    Internal(String),

    /// The verifier service answered with a non-success status.
    #[error("verifier service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The verifier service could not be reached.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl CheckerError {
    /// HTTP status the verifier endpoint answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            CheckerError::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(CheckerError::InvalidInput("x".into()).http_status(), 400);
        assert_eq!(CheckerError::Internal("x".into()).http_status(), 500);
    }
}
