//! Ledger row to domain reaction conversion.

use tipjar_core::entities::{Reaction, ReactionKind};
use tipjar_core::error::DomainError;
use tipjar_core::value_objects::{TipId, VisitorId};

use crate::models::TipReactionModel;

/// Fallible on purpose: the CHECK constraint keeps `kind` to
/// 'like'/'dislike', so an unparseable row means corruption and surfaces as
/// an internal error instead of a panic.
impl TryFrom<TipReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: TipReactionModel) -> Result<Self, Self::Error> {
        let kind = ReactionKind::parse(&model.kind).ok_or_else(|| {
            DomainError::InternalError(format!(
                "corrupt reaction kind '{}' for tip {}",
                model.kind, model.tip_id
            ))
        })?;

        Ok(Reaction {
            tip_id: TipId::new(model.tip_id),
            visitor_id: VisitorId::new(model.visitor_id),
            kind,
            reacted_at: model.reacted_at,
        })
    }
}
