//! Loan application routes.
//!
//! Submissions and edits arrive as `multipart/form-data` with the text fields
//! `name`, `email`, `telephone`, `occupation`, `salary` and an optional PDF
//! file part named `document`. The file is spooled to a temporary file that
//! lives until the handler returns.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::get,
};
use lendy_core::application::{ApplicationService, LoanApplication, LoanFormData};
use lendy_core::document::{DocumentLinks, DocumentPurpose};
use lendy_core::storage::{LocalDocument, StorageService};
use lendy_db::LoanApplicationRepository;
use lendy_shared::{AppError, ApplicationId};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Multipart field carrying the supporting document.
const DOCUMENT_FIELD: &str = "document";

/// Creates the loan application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(list_applications).post(submit_application),
        )
        .route(
            "/applications/{id}",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
        .route("/applications/{id}/document", get(get_document_url))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a newly created application.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Identifier of the new record.
    pub id: ApplicationId,
}

/// A stored application with its derived document links.
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    /// The stored record.
    #[serde(flatten)]
    pub application: LoanApplication,
    /// Purpose-specific document URLs, `null` when no document is attached.
    pub document_links: Option<DocumentLinks>,
}

impl From<LoanApplication> for ApplicationResponse {
    fn from(application: LoanApplication) -> Self {
        let document_links = application.document_links();
        Self {
            application,
            document_links,
        }
    }
}

/// Query parameters for the document URL endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    /// `view`, `download`, `mobile` or `embed`; anything else means `view`.
    pub purpose: Option<String>,
    /// Download file name; defaults to the stored document name.
    pub file_name: Option<String>,
}

/// Response for the document URL endpoint.
#[derive(Debug, Serialize)]
pub struct DocumentUrlResponse {
    /// Resolved purpose.
    pub purpose: DocumentPurpose,
    /// Derived URL.
    pub url: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

type Service = ApplicationService<LoanApplicationRepository, StorageService>;

/// Build the application service for one request.
fn application_service(state: &AppState) -> Service {
    let repo = LoanApplicationRepository::new((*state.db).clone());
    ApplicationService::new(
        Arc::new(repo),
        state.storage.clone(),
        state.storage.config().clone(),
    )
}

/// Parse a path id. Ids that cannot exist are reported as missing records.
fn parse_id(raw: &str) -> Result<ApplicationId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(AppError::NotFound(format!("loan application {raw}"))))
}

/// Read the form fields and spool the document, if any, to disk.
///
/// The returned temp file must outlive the service call that uploads it.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(LoanFormData, Option<NamedTempFile>), ApiError> {
    let mut form = LoanFormData::default();
    let mut spool = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = field.text().await?,
            "email" => form.email = field.text().await?,
            "telephone" => form.telephone = field.text().await?,
            "occupation" => form.occupation = field.text().await?,
            "salary" => form.salary = field.text().await?,
            DOCUMENT_FIELD => {
                let display_name = field.file_name().unwrap_or_default().to_owned();
                let mime_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was picked
                if display_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                let file = NamedTempFile::new()
                    .map_err(|e| AppError::Internal(format!("failed to spool document: {e}")))?;
                tokio::fs::write(file.path(), &bytes)
                    .await
                    .map_err(|e| AppError::Internal(format!("failed to spool document: {e}")))?;

                debug!(
                    file_name = %display_name,
                    mime_type = ?mime_type,
                    size = bytes.len(),
                    "Spooled document"
                );
                // Parts without a content type are taken as PDF
                form.document = Some(match mime_type {
                    Some(mime_type) => LocalDocument::new(file.path(), display_name, mime_type),
                    None => LocalDocument::pdf(file.path(), display_name),
                });
                spool = Some(file);
            }
            other => debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok((form, spool))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/applications`
/// Submit a new application.
async fn submit_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let (form, _spool) = read_form(multipart).await?;
    let id = application_service(&state).submit(form).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET `/applications`
/// List all applications, newest first.
async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let records = application_service(&state).list().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET `/applications/{id}`
async fn get_application(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let record = application_service(&state)
        .get_one(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("loan application {id}")))?;
    Ok(Json(record.into()))
}

/// PUT `/applications/{id}`
/// Replace the text fields and optionally the document.
async fn update_application(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    let (form, _spool) = read_form(multipart).await?;
    application_service(&state).update(id, form).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/applications/{id}`
/// Deleting a missing application succeeds, including ids that cannot exist.
async fn delete_application(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match raw_id.parse::<ApplicationId>() {
        Ok(id) => application_service(&state).delete(id).await?,
        Err(_) => debug!(id = %raw_id, "Delete of malformed id ignored"),
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/applications/{id}/document`
/// Derive a purpose-specific URL for the attached document.
async fn get_document_url(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<DocumentUrlResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let record = application_service(&state)
        .get_one(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("loan application {id}")))?;

    let purpose = DocumentPurpose::from_usage(query.purpose.as_deref());
    let url = record
        .document_url_for(purpose, query.file_name.as_deref())
        .ok_or_else(|| AppError::NotFound(format!("loan application {id} has no document")))?;

    Ok(Json(DocumentUrlResponse { purpose, url }))
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
