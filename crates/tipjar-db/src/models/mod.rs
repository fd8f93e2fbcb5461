//! Row types mirroring the Postgres schema.

mod reaction;
mod tip;

pub use reaction::TipReactionModel;
pub use tip::{TipCountersModel, TipModel};
