//! Storage traits the domain depends on.
//!
//! The domain states what it needs from its stores; `tipjar-db` supplies the
//! Postgres implementations.

use async_trait::async_trait;

use crate::entities::{Reaction, ReactionKind, ReactionOutcome, Tip};
use crate::error::DomainError;
use crate::value_objects::{TipId, VisitorId};

/// Result alias for store operations.
pub type RepoResult<T> = Result<T, DomainError>;

/// The tip collection.
#[async_trait]
pub trait TipRepository: Send + Sync {
    async fn find_by_id(&self, id: TipId) -> RepoResult<Option<Tip>>;

    /// Persist a new tip
    async fn create(&self, tip: &Tip) -> RepoResult<()>;

    /// Fetch a bounded working set with no particular order (feed sampling,
    /// daily-pick sampling)
    async fn sample(&self, limit: i64) -> RepoResult<Vec<Tip>>;

    /// Tips ordered by like count descending, recency as tiebreaker
    async fn top_by_likes(&self, limit: i64) -> RepoResult<Vec<Tip>>;

    /// Tips ordered by creation time descending
    async fn latest(&self, limit: i64) -> RepoResult<Vec<Tip>>;
}

/// The per-visitor reaction ledger.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the ledger entry for one (visitor, tip) pair
    async fn find(&self, tip_id: TipId, visitor_id: VisitorId) -> RepoResult<Option<Reaction>>;

    /// Ledger entries one visitor holds across a set of tips (listing
    /// annotation)
    async fn find_for_tips(
        &self,
        visitor_id: VisitorId,
        tip_ids: &[TipId],
    ) -> RepoResult<Vec<Reaction>>;

    /// Apply one reaction request: arbitrate the add/toggle-off/switch
    /// transition against the current entry and adjust the tip's counters,
    /// atomically with respect to concurrent requests for the same pair.
    ///
    /// Returns the post-transition outcome. Fails with
    /// [`DomainError::TipNotFound`] when the tip does not exist; in that case
    /// no ledger entry is written.
    async fn apply(
        &self,
        tip_id: TipId,
        visitor_id: VisitorId,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome>;
}
