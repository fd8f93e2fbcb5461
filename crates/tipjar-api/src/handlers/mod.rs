//! HTTP handlers, one module per surface: the front page, listings,
//! reactions, and the health probes.

pub mod front;
pub mod health;
pub mod reactions;
pub mod tips;
