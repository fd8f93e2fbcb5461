//! Application-level error type.
//!
//! Everything above the domain layer funnels into [`AppError`]; the API
//! crate turns it into an HTTP response, so each variant knows its status
//! code and its stable wire code.

use std::fmt;
use tipjar_core::DomainError;

/// Result alias used by server setup and anything else returning [`AppError`].
pub type AppResult<T> = Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("{0} was not found")]
    NotFound(String),

    #[error("database failure: {0}")]
    Database(String),

    #[error("cache failure: {0}")]
    Cache(String),

    #[error("bad configuration: {0}")]
    Config(String),

    // Message stays generic; the source carries the detail for logs.
    #[error("internal error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// HTTP status this error should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() || e.is_invalid_argument() => 400,
            Self::Domain(_) => 500,
            Self::Database(_) | Self::Cache(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for the error envelope.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// A 404 for the named resource.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// A 400 with the given explanation.
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// A 500 wrapping any error.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
