//! Postgres-backed reaction ledger.
//!
//! The reaction transition (add / toggle-off / switch) reads the visitor's
//! current ledger entry and then writes conditionally on that entry still
//! holding its read value. A concurrent request for the same (tip, visitor)
//! pair makes the conditional write match zero rows; the whole attempt rolls
//! back and replays against fresh state instead of applying a stale delta.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use tipjar_core::entities::{Reaction, ReactionChange, ReactionKind, ReactionOutcome};
use tipjar_core::error::DomainError;
use tipjar_core::traits::{ReactionRepository, RepoResult};
use tipjar_core::value_objects::{TipId, VisitorId};

use crate::models::{TipCountersModel, TipReactionModel};

use super::error::{map_db_error, tip_not_found};

/// Attempts before a transition that keeps losing conditional writes gives up
const MAX_APPLY_ATTEMPTS: u32 = 3;

/// Per-visitor reaction ledger on top of the `tip_reactions` table.
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One attempt at the transition, in its own transaction.
    ///
    /// Returns `Ok(None)` when a concurrent writer changed the ledger entry
    /// between our read and our conditional write; the caller replays.
    async fn try_apply(
        &self,
        tip_id: TipId,
        visitor_id: VisitorId,
        kind: ReactionKind,
    ) -> RepoResult<Option<ReactionOutcome>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // No ledger writes for tips that do not exist
        let exists = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM tips WHERE id = $1
            ",
        )
        .bind(tip_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if exists.is_none() {
            return Err(tip_not_found(tip_id));
        }

        let current = sqlx::query_scalar::<_, String>(
            r"
            SELECT kind FROM tip_reactions
            WHERE tip_id = $1 AND visitor_id = $2
            ",
        )
        .bind(tip_id.into_inner())
        .bind(visitor_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let current = match current {
            Some(raw) => Some(ReactionKind::parse(&raw).ok_or_else(|| {
                DomainError::InternalError(format!(
                    "corrupt reaction kind '{raw}' for tip {tip_id}"
                ))
            })?),
            None => None,
        };

        let change = ReactionChange::plan(current, kind);

        if !Self::write_ledger(&mut tx, tip_id, visitor_id, kind, change).await? {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        }

        // Both counters move in one statement so no reader ever sees a
        // half-applied switch. GREATEST keeps them from going negative.
        let (like_delta, dislike_delta) = change.counter_deltas(kind);
        let counters = sqlx::query_as::<_, TipCountersModel>(
            r"
            UPDATE tips
            SET likes = GREATEST(likes + $2, 0),
                dislikes = GREATEST(dislikes + $3, 0)
            WHERE id = $1
            RETURNING likes, dislikes
            ",
        )
        .bind(tip_id.into_inner())
        .bind(like_delta)
        .bind(dislike_delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(ReactionOutcome {
            change,
            requested: kind,
            likes: counters.likes,
            dislikes: counters.dislikes,
        }))
    }

    /// Apply the planned ledger write, conditional on the entry still holding
    /// the value we read. Returns whether the write matched a row.
    async fn write_ledger(
        tx: &mut Transaction<'_, Postgres>,
        tip_id: TipId,
        visitor_id: VisitorId,
        kind: ReactionKind,
        change: ReactionChange,
    ) -> RepoResult<bool> {
        let result = match change {
            ReactionChange::Added => {
                sqlx::query(
                    r"
                    INSERT INTO tip_reactions (tip_id, visitor_id, kind, reacted_at)
                    VALUES ($1, $2, $3, NOW())
                    ON CONFLICT (tip_id, visitor_id) DO NOTHING
                    ",
                )
                .bind(tip_id.into_inner())
                .bind(visitor_id.into_inner())
                .bind(kind.as_str())
                .execute(&mut **tx)
                .await
            }
            ReactionChange::Removed => {
                sqlx::query(
                    r"
                    DELETE FROM tip_reactions
                    WHERE tip_id = $1 AND visitor_id = $2 AND kind = $3
                    ",
                )
                .bind(tip_id.into_inner())
                .bind(visitor_id.into_inner())
                .bind(kind.as_str())
                .execute(&mut **tx)
                .await
            }
            ReactionChange::Switched => {
                sqlx::query(
                    r"
                    UPDATE tip_reactions
                    SET kind = $3, reacted_at = NOW()
                    WHERE tip_id = $1 AND visitor_id = $2 AND kind = $4
                    ",
                )
                .bind(tip_id.into_inner())
                .bind(visitor_id.into_inner())
                .bind(kind.as_str())
                .bind(kind.opposite().as_str())
                .execute(&mut **tx)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, tip_id: TipId, visitor_id: VisitorId) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, TipReactionModel>(
            r"
            SELECT tip_id, visitor_id, kind, reacted_at
            FROM tip_reactions
            WHERE tip_id = $1 AND visitor_id = $2
            ",
        )
        .bind(tip_id.into_inner())
        .bind(visitor_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, tip_ids))]
    async fn find_for_tips(
        &self,
        visitor_id: VisitorId,
        tip_ids: &[TipId],
    ) -> RepoResult<Vec<Reaction>> {
        if tip_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = tip_ids.iter().map(|t| t.into_inner()).collect();

        let results = sqlx::query_as::<_, TipReactionModel>(
            r"
            SELECT tip_id, visitor_id, kind, reacted_at
            FROM tip_reactions
            WHERE visitor_id = $1 AND tip_id = ANY($2)
            ",
        )
        .bind(visitor_id.into_inner())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn apply(
        &self,
        tip_id: TipId,
        visitor_id: VisitorId,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome> {
        for attempt in 1..=MAX_APPLY_ATTEMPTS {
            if let Some(outcome) = self.try_apply(tip_id, visitor_id, kind).await? {
                return Ok(outcome);
            }
            debug!(tip_id = %tip_id, attempt, "Reaction write lost to a concurrent request, retrying");
        }

        Err(DomainError::DatabaseError(format!(
            "reaction for tip {tip_id} kept losing to concurrent writes"
        )))
    }
}
