//! Failure vocabulary of the domain layer.
//!
//! The classification helpers drive HTTP status mapping at the edge, and
//! the [`DomainError::code`] strings travel in API error envelopes, so both
//! must stay stable.

use thiserror::Error;

use crate::value_objects::TipId;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The referenced tip does not exist, or no longer does.
    #[error("no tip with id {0}")]
    TipNotFound(TipId),

    /// A submission failed a structural check; nothing was written.
    #[error("rejected submission: {0}")]
    ValidationError(String),

    /// A submission field matched the safety filter; nothing was written.
    #[error("the {field} field tripped the safety filter")]
    UnsafeContent { field: &'static str },

    /// The content field is over the length ceiling; nothing was written.
    #[error("content exceeds {max} characters")]
    ContentTooLong { max: usize },

    /// The request named a listing section that does not exist.
    #[error("no listing section named {0:?}")]
    UnknownSection(String),

    /// The request named a reaction type that does not exist.
    #[error("no reaction type named {0:?}")]
    UnknownReaction(String),

    /// Postgres failed underneath an otherwise valid request.
    #[error("database operation failed: {0}")]
    DatabaseError(String),

    /// Redis failed underneath an otherwise valid request.
    #[error("cache operation failed: {0}")]
    CacheError(String),

    /// A bug: stored data or internal state that should be impossible.
    #[error("internal invariant broken: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable machine-readable code carried in API error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TipNotFound(_) => "UNKNOWN_TIP",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnsafeContent { .. } => "UNSAFE_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::UnknownSection(_) => "UNKNOWN_SECTION",
            Self::UnknownReaction(_) => "UNKNOWN_REACTION",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// The referenced resource is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TipNotFound(_))
    }

    /// A rejected submission, reported back to the submitter.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::UnsafeContent { .. } | Self::ContentTooLong { .. }
        )
    }

    /// A malformed request parameter, such as an unknown section name.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::UnknownSection(_) | Self::UnknownReaction(_))
    }

    /// A backing store failed; the request itself was fine.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::CacheError(_))
    }
}
