//! Error responses.
//!
//! Every failure is rendered as `{"error": <code>, "message": <text>}` with
//! the status code of the underlying [`AppError`].

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lendy_core::application::ApplicationError;
use lendy_shared::AppError;
use serde_json::json;
use tracing::error;

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Domain or infrastructure failure.
    App(AppError),
    /// Malformed or oversized multipart body.
    Multipart(MultipartError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self::App(err.into())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::App(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    error!(error = %err, code = err.error_code(), "Request failed");
                }
                (status, err.error_code(), err.to_string())
            }
            Self::Multipart(err) => (err.status(), "INVALID_MULTIPART", err.body_text()),
        };

        (
            status,
            Json(json!({
                "error": code,
                "message": message,
            })),
        )
            .into_response()
    }
}
