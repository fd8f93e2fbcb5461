//! The like/dislike ledger and its transition rules.
//!
//! A visitor holds at most one reaction per tip. Requesting the same kind
//! again toggles it off; requesting the other kind switches it. The
//! transition table here is the single source of truth for both the
//! resulting ledger state and the counter deltas the tip must absorb.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::{TipId, VisitorId};

/// The two reaction kinds a visitor can hold on a tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Canonical lowercase name as it appears in URLs and storage
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// The other kind
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    /// Parse a reaction name; `None` for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }

    /// Unit counter delta for this kind: (likes, dislikes)
    const fn unit(self) -> (i64, i64) {
        match self {
            Self::Like => (1, 0),
            Self::Dislike => (0, 1),
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub tip_id: TipId,
    pub visitor_id: VisitorId,
    pub kind: ReactionKind,
    pub reacted_at: DateTime<Utc>,
}

impl Reaction {
    /// A fresh entry, stamped with the current time.
    pub fn new(tip_id: TipId, visitor_id: VisitorId, kind: ReactionKind) -> Self {
        Self {
            tip_id,
            visitor_id,
            kind,
            reacted_at: Utc::now(),
        }
    }
}

/// What a reaction request did to the ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    /// No prior entry; one was created
    Added,
    /// Prior entry matched the request; it was deleted (toggle-off)
    Removed,
    /// Prior entry was the other kind; it was replaced (switch)
    Switched,
}

impl ReactionChange {
    /// Decide the transition for (current entry, requested kind)
    pub fn plan(current: Option<ReactionKind>, requested: ReactionKind) -> Self {
        match current {
            None => Self::Added,
            Some(kind) if kind == requested => Self::Removed,
            Some(_) => Self::Switched,
        }
    }

    /// Ledger state after the transition
    pub const fn resulting(self, requested: ReactionKind) -> Option<ReactionKind> {
        match self {
            Self::Added | Self::Switched => Some(requested),
            Self::Removed => None,
        }
    }

    /// Counter deltas the tip absorbs: (likes, dislikes)
    ///
    /// A switch moves exactly one unit between the counters; the store is
    /// still responsible for clamping at zero.
    pub const fn counter_deltas(self, requested: ReactionKind) -> (i64, i64) {
        let (like, dislike) = requested.unit();
        match self {
            Self::Added => (like, dislike),
            Self::Removed => (-like, -dislike),
            Self::Switched => (like - dislike, dislike - like),
        }
    }
}

/// Post-transition view of a reaction request: the tip's updated counters
/// plus what the ledger now records for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub change: ReactionChange,
    pub requested: ReactionKind,
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionOutcome {
    /// Ledger state after the transition
    #[inline]
    pub fn state(&self) -> Option<ReactionKind> {
        self.change.resulting(self.requested)
    }

    /// Whether the caller now likes the tip
    #[inline]
    pub fn liked(&self) -> bool {
        self.state() == Some(ReactionKind::Like)
    }

    /// Whether the caller now dislikes the tip
    #[inline]
    pub fn disliked(&self) -> bool {
        self.state() == Some(ReactionKind::Dislike)
    }
}
