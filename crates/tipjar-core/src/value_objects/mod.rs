//! Identifier and section types shared across the layers.

mod section;
mod tip_id;
mod visitor_id;

pub use section::ListSection;
pub use tip_id::{TipId, TipIdGenerator, TipIdParseError};
pub use visitor_id::{VisitorId, VisitorIdParseError};
