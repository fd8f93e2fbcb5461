//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Submission content additionally passes through the safety
//! filter in the service layer; the derive-level rules here only cover
//! presence and length.

use serde::Deserialize;
use validator::Validate;

/// Tip submission form
///
/// Field names match the HTML form the original page posts (`username`,
/// `twitter_username`, `content`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTipRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub username: String,

    /// Optional external handle; an empty form field counts as absent
    #[validate(length(max = 100, message = "Handle must be at most 100 characters"))]
    pub twitter_username: Option<String>,

    #[validate(length(min = 1, max = 280, message = "Tip must be 1-280 characters"))]
    pub content: String,
}

impl CreateTipRequest {
    /// The handle with empty-string form submissions normalized away
    pub fn handle(&self) -> Option<&str> {
        self.twitter_username
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}
