//! Orchestrator error type

use quarry_client::ClientError;
use quarry_core::ValidationError;
use thiserror::Error;

/// Result type alias for orchestrator operations
pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Errors surfaced by job preparation, submission and tracking
///
/// Nothing is retried: every failure reaches the caller as soon as it happens.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// A raw argument does not have the type the operation requires
    #[error("Type constraint violated: {0}")]
    TypeConstraint(String),

    /// Local validation failed before anything was submitted
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The capability exists in the API but is deliberately unsupported
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// The processing service or object store returned an error
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The job reached the `Failed` state
    #[error("Processing job {job_name} failed: {reason}")]
    JobFailed { job_name: String, reason: String },
}

impl ProcessingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
