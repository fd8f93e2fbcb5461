//! Request extractors: the anonymous visitor cookie and validated forms.

mod validated;
mod visitor;

pub use validated::ValidatedForm;
pub use visitor::{visitor_cookie, VisitorIdentity, VISITOR_COOKIE};
