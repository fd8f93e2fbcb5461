//! API error handling.
//!
//! Every failure leaving a handler becomes the same JSON envelope:
//! `{"error": {"code", "message", "details"?}}`, with `details` reserved for
//! field-level validation output.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tipjar_common::AppError;
use tipjar_core::DomainError;
use tipjar_service::ServiceError;
use tracing::error;
use validator::ValidationErrors;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with, unified for `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("submission failed field checks: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed form submission: {0}")]
    InvalidForm(String),

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

/// Lower-layer status codes arrive as u16; anything out of range is a bug
/// and degrades to 500.
fn http_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => http_status(e.status_code()),
            Self::Service(e) => http_status(e.status_code()),
            Self::Domain(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Domain(e) if e.is_validation() || e.is_invalid_argument() => {
                StatusCode::BAD_REQUEST
            }
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the envelope.
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidForm(_) => "INVALID_FORM",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Wrap any error as a 500.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// A 400 for a form body that could not be read at all.
    pub fn invalid_form(msg: impl Into<String>) -> Self {
        Self::InvalidForm(msg.into())
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server errors get logged here; client errors are the caller's
        // problem and stay quiet.
        if status.is_server_error() {
            error!(error = ?self, "Request failed server-side");
        }

        // Only validator failures carry field-level details
        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
