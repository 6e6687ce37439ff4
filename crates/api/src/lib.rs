//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for loan applications
//! - Multipart form handling with on-disk spooling of documents
//! - JSON error responses

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use lendy_core::storage::StorageService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Upload client for supporting documents.
    pub storage: Arc<StorageService>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
