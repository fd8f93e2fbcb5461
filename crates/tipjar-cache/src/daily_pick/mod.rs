//! Daily pick storage module.
//!
//! Remembers which tip was featured on each calendar date.

mod store;

pub use store::DailyPickStore;
