//! Upload error types.

use std::path::PathBuf;

use thiserror::Error;

/// Object-store upload errors.
///
/// Every variant means the document was not stored; no variant is retried
/// internally.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The endpoint answered with a non-success status.
    #[error("upload rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Upstream response body.
        body: String,
    },

    /// The endpoint answered successfully but without a permanent URL.
    #[error("upload response is missing `secure_url`: {body}")]
    MissingSecureUrl {
        /// Upstream response body.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("upload transport failed: {0}")]
    Transport(String),

    /// The local document could not be read.
    #[error("cannot read local document {path}: {message}")]
    LocalFile {
        /// Location of the local document.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },
}

impl UploadError {
    /// Create a rejected upload error.
    #[must_use]
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Create a missing `secure_url` error.
    #[must_use]
    pub fn missing_secure_url(body: impl Into<String>) -> Self {
        Self::MissingSecureUrl { body: body.into() }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Upstream response text, when the endpoint produced one.
    #[must_use]
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } | Self::MissingSecureUrl { body } => Some(body),
            Self::Transport(_) | Self::LocalFile { .. } => None,
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
