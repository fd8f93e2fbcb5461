//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use tipjar_core::entities::{ReactionKind, ReactionOutcome, Tip};

use super::responses::{ReactionStatusResponse, TipResponse};

/// Helper struct pairing a tip with the viewer's own ledger entry for it
#[derive(Debug, Clone)]
pub struct AnnotatedTip {
    pub tip: Tip,
    pub viewer_reaction: Option<ReactionKind>,
}

impl From<&AnnotatedTip> for TipResponse {
    fn from(annotated: &AnnotatedTip) -> Self {
        let tip = &annotated.tip;
        Self {
            id: tip.id.to_string(),
            author: tip.author.clone(),
            handle: tip.handle.clone(),
            body: tip.body.clone(),
            likes: tip.likes,
            dislikes: tip.dislikes,
            liked: annotated.viewer_reaction == Some(ReactionKind::Like),
            disliked: annotated.viewer_reaction == Some(ReactionKind::Dislike),
            created_at: tip.created_at,
        }
    }
}

impl From<AnnotatedTip> for TipResponse {
    fn from(annotated: AnnotatedTip) -> Self {
        Self::from(&annotated)
    }
}

/// Unannotated view: a tip as seen by a viewer with no reactions
impl From<&Tip> for TipResponse {
    fn from(tip: &Tip) -> Self {
        Self::from(&AnnotatedTip {
            tip: tip.clone(),
            viewer_reaction: None,
        })
    }
}

impl From<ReactionOutcome> for ReactionStatusResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            likes: outcome.likes,
            dislikes: outcome.dislikes,
            liked: outcome.liked(),
            disliked: outcome.disliked(),
        }
    }
}
