//! Row-to-entity conversions.
//!
//! Reads go through `From<Model>` (or `TryFrom` where a stored row can be
//! corrupt); writes borrow their fields through the `*Insert` structs.

mod reaction;
mod tip;

pub use tip::TipInsert;
