//! Application error types.

use lendy_shared::{AppError, ApplicationId};
use thiserror::Error;

use crate::storage::UploadError;

/// Loan application operation errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// No record with this identifier.
    #[error("loan application not found: {0}")]
    NotFound(ApplicationId),

    /// Form input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Document upload failed; nothing was persisted.
    #[error("document upload failed: {0}")]
    Upload(#[from] UploadError),

    /// Database operation failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ApplicationError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: ApplicationId) -> Self {
        Self::NotFound(id)
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a persistence error.
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

impl From<ApplicationError> for AppError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::NotFound(id) => Self::NotFound(format!("loan application {id}")),
            ApplicationError::Validation(msg) => Self::Validation(msg),
            ApplicationError::Upload(e) => Self::ExternalService(e.to_string()),
            ApplicationError::Persistence(msg) => Self::Database(msg),
        }
    }
}
