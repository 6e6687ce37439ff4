//! Upload client implementation using reqwest multipart requests.

use std::future::Future;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::config::StorageConfig;
use super::error::UploadError;

/// A document on the local filesystem that has not been uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDocument {
    /// Location of the readable file.
    pub location: PathBuf,
    /// Original file name shown to users.
    pub display_name: String,
    /// MIME type reported by the document picker.
    pub mime_type: String,
}

impl LocalDocument {
    /// Create a local document reference.
    #[must_use]
    pub fn new(
        location: impl Into<PathBuf>,
        display_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            display_name: display_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Create a local document reference with the PDF MIME type.
    #[must_use]
    pub fn pdf(location: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self::new(location, display_name, StorageConfig::DOCUMENT_MIME_TYPE)
    }

    /// Whether the reported MIME type is PDF. Parameters and case are ignored.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.mime_type
            .split(';')
            .next()
            .is_some_and(|essence| {
                essence
                    .trim()
                    .eq_ignore_ascii_case(StorageConfig::DOCUMENT_MIME_TYPE)
            })
    }
}

/// Sends local documents to the object store.
///
/// Implementations must be stateless between calls so one instance can serve
/// concurrent uploads.
pub trait DocumentUploader: Send + Sync {
    /// Upload `document` and return its permanent retrieval URL.
    fn upload(
        &self,
        document: &LocalDocument,
    ) -> impl Future<Output = Result<String, UploadError>> + Send;
}

/// Successful upload response body.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// HTTP upload client for the object store.
#[derive(Debug, Clone)]
pub struct StorageService {
    client: reqwest::Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    async fn read_document(document: &LocalDocument) -> Result<Vec<u8>, UploadError> {
        tokio::fs::read(&document.location)
            .await
            .map_err(|e| UploadError::LocalFile {
                path: document.location.clone(),
                message: e.to_string(),
            })
    }

    fn build_form(&self, document: &LocalDocument, bytes: Vec<u8>) -> Result<Form, UploadError> {
        let part = Part::bytes(bytes)
            .file_name(document.display_name.clone())
            .mime_str(&document.mime_type)?;

        Ok(Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone()))
    }
}

impl DocumentUploader for StorageService {
    async fn upload(&self, document: &LocalDocument) -> Result<String, UploadError> {
        let bytes = Self::read_document(document).await?;
        debug!(
            document_name = %document.display_name,
            size = bytes.len(),
            "Uploading document"
        );

        let form = self.build_form(document, bytes)?;
        let mut request = self
            .client
            .post(&self.config.upload_endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form);
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Object store rejected upload");
            return Err(UploadError::rejected(status.as_u16(), body));
        }

        let secure_url = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.secure_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| UploadError::missing_secure_url(body.clone()))?;

        info!(
            document_name = %document.display_name,
            url = %secure_url,
            "Document uploaded"
        );
        Ok(secure_url)
    }
}
