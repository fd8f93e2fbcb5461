//! Like and dislike handling.

use tracing::{info, instrument};

use tipjar_core::entities::ReactionKind;
use tipjar_core::value_objects::{TipId, VisitorId};

use crate::dto::ReactionStatusResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Applies reaction requests against the per-visitor ledger.
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Applies one reaction request and reports the post-transition state.
    ///
    /// Repeating a held reaction toggles it off and requesting the opposite
    /// kind switches; the ledger arbitrates between concurrent requests. The
    /// returned booleans describe what the visitor holds afterwards, so a
    /// toggle-off comes back with both false.
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        tip_id: TipId,
        visitor_id: VisitorId,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionStatusResponse> {
        let outcome = self
            .ctx
            .reaction_repo()
            .apply(tip_id, visitor_id, kind)
            .await?;

        info!(%tip_id, %kind, change = ?outcome.change, "Reaction applied");

        Ok(outcome.into())
    }
}
