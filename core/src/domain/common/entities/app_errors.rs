use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Resource already exists")]
    AlreadyExists,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Errors a permissive deployment may recover from by retrying locally.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::ExternalServiceError(_))
    }
}
