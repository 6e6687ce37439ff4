//! Loan application service implementation.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use lendy_shared::ApplicationId;
use tracing::{debug, info};

use super::error::ApplicationError;
use super::types::{
    ApplicationChanges, LoanApplication, LoanFormData, NewLoanApplication, StoredDocument,
};
use crate::document;
use crate::storage::{DocumentUploader, LocalDocument, StorageConfig};

/// Repository trait for loan application persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new record, assigning its identifier and both timestamps.
    fn create(
        &self,
        input: NewLoanApplication,
    ) -> impl Future<Output = Result<LoanApplication, ApplicationError>> + Send;

    /// All records.
    fn list(&self) -> impl Future<Output = Result<Vec<LoanApplication>, ApplicationError>> + Send;

    /// Find a record by ID.
    fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> impl Future<Output = Result<Option<LoanApplication>, ApplicationError>> + Send;

    /// Replace a record's mutable fields. Returns `None` if the record is gone.
    fn update(
        &self,
        id: ApplicationId,
        changes: ApplicationChanges,
    ) -> impl Future<Output = Result<Option<LoanApplication>, ApplicationError>> + Send;

    /// Delete a record. Returns whether a record was removed.
    fn delete(
        &self,
        id: ApplicationId,
    ) -> impl Future<Output = Result<bool, ApplicationError>> + Send;
}

/// Service for submitting and managing loan applications.
///
/// Uploads always complete before the record is written, so a failed upload
/// leaves the repository untouched. Previously uploaded documents are never
/// deleted from the object store.
pub struct ApplicationService<R: ApplicationRepository, U: DocumentUploader> {
    repo: Arc<R>,
    uploader: Arc<U>,
    config: StorageConfig,
}

impl<R: ApplicationRepository, U: DocumentUploader> ApplicationService<R, U> {
    /// Create a new application service.
    #[must_use]
    pub fn new(repo: Arc<R>, uploader: Arc<U>, config: StorageConfig) -> Self {
        Self {
            repo,
            uploader,
            config,
        }
    }

    async fn upload(&self, document: &LocalDocument) -> Result<StoredDocument, ApplicationError> {
        let url = self.uploader.upload(document).await?;
        Ok(StoredDocument {
            url,
            name: document.display_name.clone(),
        })
    }

    /// Submit a new application, uploading its document first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The form is invalid
    /// - The document upload fails (no record is created)
    /// - The database operation fails
    pub async fn submit(&self, form: LoanFormData) -> Result<ApplicationId, ApplicationError> {
        form.validate()?;

        let document = match &form.document {
            Some(local) => Some(self.upload(local).await?),
            None => None,
        };

        let record = self
            .repo
            .create(NewLoanApplication {
                name: form.name,
                email: form.email,
                telephone: form.telephone,
                occupation: form.occupation,
                salary: form.salary,
                document,
            })
            .await?;

        info!(
            application_id = %record.id,
            has_document = record.document().is_some(),
            "Loan application submitted"
        );
        Ok(record.id)
    }

    /// List all applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list(&self) -> Result<Vec<LoanApplication>, ApplicationError> {
        let mut records = self.repo.list().await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = records.len(), "Fetched loan applications");
        Ok(records)
    }

    /// Get one application. A missing record is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_one(
        &self,
        id: ApplicationId,
    ) -> Result<Option<LoanApplication>, ApplicationError> {
        let record = self.repo.find_by_id(id).await?;
        if record.is_none() {
            debug!(application_id = %id, "Loan application not found");
        }
        Ok(record)
    }

    /// Replace all text fields of an application.
    ///
    /// A new document, when supplied, is uploaded and replaces the old one;
    /// otherwise the existing document is kept as is.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The application does not exist (checked before the form)
    /// - The form is invalid
    /// - The document upload fails (the record is left unchanged)
    /// - The database operation fails
    pub async fn update(
        &self,
        id: ApplicationId,
        form: LoanFormData,
    ) -> Result<(), ApplicationError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(id))?;

        form.validate()?;

        let document = match &form.document {
            Some(local) => Some(self.upload(local).await?),
            None => existing.document(),
        };

        let changes = ApplicationChanges {
            name: form.name,
            email: form.email,
            telephone: form.telephone,
            occupation: form.occupation,
            salary: form.salary,
            document,
            updated_at: Utc::now().max(existing.created_at),
        };

        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| ApplicationError::not_found(id))?;

        info!(
            application_id = %id,
            document_replaced = form.document.is_some(),
            "Loan application updated"
        );
        Ok(())
    }

    /// Delete an application. Deleting a missing record is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, id: ApplicationId) -> Result<(), ApplicationError> {
        if self.repo.delete(id).await? {
            info!(application_id = %id, "Loan application deleted");
        } else {
            debug!(application_id = %id, "Delete of missing loan application ignored");
        }
        Ok(())
    }

    /// Whether `url` looks like a stored document served by the configured host.
    #[must_use]
    pub fn is_plausible_document_url(&self, url: &str) -> bool {
        document::is_plausible_document_url(url, &self.config)
    }
}
