use thiserror::Error;

/// Engine-wide error type, consolidating all possible errors into a single enum.
///
/// The extraction pipeline itself is total and never returns an error; these
/// variants surface from the export, scheduling and configuration surfaces.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Represents data validation errors (e.g., invalid configuration values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unusable lexicon table).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Validation(format!("JSON error: {}", err))
    }
}

impl From<chrono::ParseError> for EngineError {
    fn from(err: chrono::ParseError) -> Self {
        EngineError::Validation(format!("Date parse error: {}", err))
    }
}

impl From<uuid::Error> for EngineError {
    fn from(err: uuid::Error) -> Self {
        EngineError::Validation(format!("UUID error: {}", err))
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<tokio::time::error::Elapsed> for EngineError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        EngineError::Timeout(format!("Operation timed out: {}", err))
    }
}
