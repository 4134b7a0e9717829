//! Request-level error taxonomy for the execution pipeline.
//!
//! Per-test-case faults never appear here: they are recovered inside the
//! generated harness or the evaluator and degrade a single `TestOutcome`.
//! Everything in this enum aborts the whole request.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    /// Language string not recognized after alias resolution.
    /// Carries the normalized (trimmed, lower-cased) string.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Required request field missing or empty.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The sandbox service could not be reached at all.
    #[error("execution backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend ran but produced no usable result: non-2xx from the
    /// sandbox, an uncaught in-process evaluation error, or an unparseable
    /// top-level harness output. Raw stdout is kept when we have it so the
    /// caller can debug what the harness actually printed.
    #[error("execution backend failed: {message}")]
    BackendFailed {
        message: String,
        stdout: Option<String>,
    },
}

impl ExecutionError {
    /// HTTP-style status category for the front controller.
    pub fn status_code(&self) -> u16 {
        match self {
            ExecutionError::InvalidRequest(_) => 400,
            ExecutionError::UnsupportedLanguage(_) => 422,
            ExecutionError::BackendUnavailable(_) | ExecutionError::BackendFailed { .. } => 500,
        }
    }

    /// Raw stdout captured from a failed sandbox run, if any.
    pub fn raw_stdout(&self) -> Option<&str> {
        match self {
            ExecutionError::BackendFailed { stdout, .. } => stdout.as_deref(),
            _ => None,
        }
    }
}
