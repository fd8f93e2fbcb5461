//! Tips, reactions, and the reaction transition rules.

mod reaction;
mod tip;

pub use reaction::{Reaction, ReactionChange, ReactionKind, ReactionOutcome};
pub use tip::Tip;
