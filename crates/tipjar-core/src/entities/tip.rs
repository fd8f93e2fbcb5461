//! The tip entity: a short user-submitted text post with an attributed author.

use chrono::{DateTime, Utc};

use crate::safety;
use crate::value_objects::TipId;

/// A published tip.
///
/// Counters are mutated only through the reaction ledger; author, handle, and
/// body are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tip {
    pub id: TipId,
    pub author: String,
    pub handle: Option<String>,
    pub body: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
}

impl Tip {
    /// Maximum body length in characters
    pub const MAX_BODY_CHARS: usize = 280;

    /// Maximum author / handle length in characters
    pub const MAX_AUTHOR_CHARS: usize = 100;

    /// A fresh tip: zeroed counters, stamped with the current time.
    pub fn new(id: TipId, author: String, handle: Option<String>, body: String) -> Self {
        Self {
            id,
            author,
            handle,
            body,
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
        }
    }

    /// A tip is safe iff both its author name and its body clear the filter
    pub fn is_safe(&self) -> bool {
        safety::is_safe(&self.author) && safety::is_safe(&self.body)
    }

    /// A body of pure whitespace counts as empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
