//! Row type for the reaction ledger.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One `tip_reactions` row: which reaction a visitor holds on a tip.
///
/// `kind` is lowercase text ('like' / 'dislike') backed by a CHECK
/// constraint.
#[derive(Debug, Clone, FromRow)]
pub struct TipReactionModel {
    pub tip_id: i64,
    pub visitor_id: Uuid,
    pub kind: String,
    pub reacted_at: DateTime<Utc>,
}
