//! Storage configuration types.

use std::time::Duration;

/// Upload client configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Multipart upload endpoint.
    pub upload_endpoint: String,
    /// Unsigned upload preset identifier.
    pub upload_preset: String,
    /// Host (or parent domain) serving stored documents.
    pub document_host: String,
    /// Per-request timeout; `None` leaves timing to the caller.
    pub request_timeout: Option<Duration>,
}

impl StorageConfig {
    /// Default document host.
    pub const DEFAULT_DOCUMENT_HOST: &'static str = "cloudinary.com";
    /// MIME type every document is uploaded with.
    pub const DOCUMENT_MIME_TYPE: &'static str = "application/pdf";

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(upload_endpoint: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self {
            upload_endpoint: upload_endpoint.into(),
            upload_preset: upload_preset.into(),
            document_host: Self::DEFAULT_DOCUMENT_HOST.to_string(),
            request_timeout: None,
        }
    }

    /// Set the document host.
    #[must_use]
    pub fn with_document_host(mut self, host: impl Into<String>) -> Self {
        self.document_host = host.into();
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Check whether `host` is the document host or one of its subdomains.
    #[must_use]
    pub fn is_document_host(&self, host: &str) -> bool {
        let expected = self.document_host.trim_start_matches('.');
        if expected.is_empty() {
            return false;
        }
        host.eq_ignore_ascii_case(expected)
            || host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", expected.to_ascii_lowercase()))
    }
}

impl From<&lendy_shared::config::StorageSettings> for StorageConfig {
    fn from(settings: &lendy_shared::config::StorageSettings) -> Self {
        let config = Self::new(&settings.upload_endpoint, &settings.upload_preset)
            .with_document_host(&settings.document_host);
        match settings.request_timeout_secs {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}
