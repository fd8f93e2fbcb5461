//! Service-layer error type.
//!
//! Domain errors pass through untouched so their codes survive to the wire;
//! everything else the services can hit collapses into validation or
//! internal.

use thiserror::Error;

use tipjar_cache::RedisPoolError;
use tipjar_common::AppError;
use tipjar_core::DomainError;

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// What a service call can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A domain rule said no; passes through with its own code intact
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input rejected before it reached the domain
    #[error("rejected input: {0}")]
    Validation(String),

    /// Wiring or invariant failure inside the service layer
    #[error("service invariant broken: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status this error should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() || e.is_invalid_argument() => 400,
            Self::Domain(_) => 500,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for the error envelope.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Daily-pick store failures surface as cache errors in the domain taxonomy
impl From<RedisPoolError> for ServiceError {
    fn from(err: RedisPoolError) -> Self {
        Self::Domain(DomainError::CacheError(err.to_string()))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}
