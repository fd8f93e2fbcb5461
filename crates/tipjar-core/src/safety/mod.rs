//! Pattern-based screening for script-injection payloads.

mod filter;

pub use filter::{is_safe, is_suspicious};
