//! Validation error shared by every crate in the workspace

use thiserror::Error;

/// A request or descriptor failed local validation
///
/// Raised before anything is sent to the processing service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The human readable reason
    pub fn message(&self) -> &str {
        &self.0
    }
}
