//! Shared error mapping for the repository layer.

use sqlx::Error as SqlxError;
use tipjar_core::error::DomainError;
use tipjar_core::value_objects::TipId;

/// Folds any sqlx failure into the domain's database error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Names the missing tip in the domain's not-found error.
pub fn tip_not_found(id: TipId) -> DomainError {
    DomainError::TipNotFound(id)
}
