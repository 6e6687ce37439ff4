//! Loan application records.
//!
//! This module owns the record model and the service that keeps a record and
//! its uploaded document consistent:
//! - Input validation
//! - Upload-before-persist sequencing on submit and update
//! - Attachment preservation when an update carries no new document
//! - Newest-first listing and explicit not-found results

mod error;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use error::ApplicationError;
pub use service::{ApplicationRepository, ApplicationService};
pub use types::{
    ApplicationChanges, LoanApplication, LoanFormData, NewLoanApplication, StoredDocument,
};
