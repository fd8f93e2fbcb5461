//! Row types for the tips table.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One `tips` row, shaped exactly like the schema in `migrations/`.
#[derive(Debug, Clone, FromRow)]
pub struct TipModel {
    pub id: i64,
    pub author: String,
    pub handle: Option<String>,
    pub body: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
}

/// Counter pair returned by the atomic counter-adjust statement
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TipCountersModel {
    pub likes: i64,
    pub dislikes: i64,
}
