//! Loan application types and data structures.

use chrono::{DateTime, Utc};
use lendy_shared::ApplicationId;
use serde::{Deserialize, Serialize};

use super::error::ApplicationError;
use crate::document::{self, DocumentLinks, DocumentPurpose};
use crate::storage::LocalDocument;

/// A document that has been uploaded to the object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Permanent retrieval URL.
    pub url: String,
    /// Original file name.
    pub name: String,
}

/// Persisted loan application record.
///
/// `document_url` and `document_name` are either both set or both empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Unique identifier.
    pub id: ApplicationId,
    /// Applicant full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact telephone.
    pub telephone: String,
    /// Occupation.
    pub occupation: String,
    /// Monthly salary, stored as entered.
    pub salary: String,
    /// Permanent URL of the supporting document, empty if none.
    pub document_url: String,
    /// Original name of the supporting document, empty if none.
    pub document_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl LoanApplication {
    /// The attached document, if any.
    #[must_use]
    pub fn document(&self) -> Option<StoredDocument> {
        if self.document_url.is_empty() {
            return None;
        }
        Some(StoredDocument {
            url: self.document_url.clone(),
            name: self.document_name.clone(),
        })
    }

    /// All purpose-specific URLs for the attached document.
    #[must_use]
    pub fn document_links(&self) -> Option<DocumentLinks> {
        DocumentLinks::for_document(&self.document_url, &self.document_name)
    }

    /// The attached document's URL for one purpose. Downloads are named
    /// `file_name` when given and non-empty, otherwise after the original file.
    #[must_use]
    pub fn document_url_for(
        &self,
        purpose: DocumentPurpose,
        file_name: Option<&str>,
    ) -> Option<String> {
        if self.document_url.is_empty() {
            return None;
        }
        let file_name = file_name
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.document_name);
        Some(document::derive_url(
            &self.document_url,
            purpose,
            Some(file_name),
        ))
    }
}

/// Form input for submitting or editing an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanFormData {
    /// Applicant full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact telephone.
    pub telephone: String,
    /// Occupation.
    pub occupation: String,
    /// Monthly salary.
    pub salary: String,
    /// New supporting document to upload.
    pub document: Option<LocalDocument>,
}

impl LoanFormData {
    /// Check required fields, reporting the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.name.trim().is_empty() {
            return Err(ApplicationError::validation("please enter your full name"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ApplicationError::validation(
                "please enter a valid email address",
            ));
        }
        if self.telephone.trim().is_empty() {
            return Err(ApplicationError::validation(
                "please enter your telephone number",
            ));
        }
        if self.occupation.trim().is_empty() {
            return Err(ApplicationError::validation("please enter your occupation"));
        }
        if self.salary.trim().is_empty() {
            return Err(ApplicationError::validation(
                "please enter your monthly salary",
            ));
        }
        if let Some(doc) = &self.document {
            if doc.display_name.trim().is_empty() {
                return Err(ApplicationError::validation(
                    "the supporting document needs a file name",
                ));
            }
            if !doc.is_pdf() {
                return Err(ApplicationError::validation(
                    "the supporting document must be a PDF",
                ));
            }
        }
        Ok(())
    }
}

/// Input for creating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoanApplication {
    /// Applicant full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact telephone.
    pub telephone: String,
    /// Occupation.
    pub occupation: String,
    /// Monthly salary.
    pub salary: String,
    /// Uploaded document, if any.
    pub document: Option<StoredDocument>,
}

/// Full replacement of a record's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationChanges {
    /// Applicant full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact telephone.
    pub telephone: String,
    /// Occupation.
    pub occupation: String,
    /// Monthly salary.
    pub salary: String,
    /// Document after the update (new upload or the preserved one).
    pub document: Option<StoredDocument>,
    /// New update timestamp, never earlier than the creation time.
    pub updated_at: DateTime<Utc>,
}
