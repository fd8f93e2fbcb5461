//! Postgres-backed implementations of the `tipjar-core` repository traits.

mod error;
mod reaction;
mod tip;

pub use reaction::PgReactionRepository;
pub use tip::PgTipRepository;
