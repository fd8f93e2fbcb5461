//! The toggle endpoint that drives the reaction ledger.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use tipjar_common::AppError;
use tipjar_core::{DomainError, ReactionKind, TipId, VisitorId};
use tipjar_service::{ReactionService, ReactionStatusResponse};

use crate::extractors::{visitor_cookie, VisitorIdentity};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle a like or dislike on a tip
///
/// POST /toggle_reaction/{tip_id}/{reaction_type}
///
/// A browser without an identity cookie gets one minted here, and only here;
/// the Set-Cookie header rides along with the counter response. Reacting to
/// a tip that does not exist is a 404 and writes nothing, cookie included.
pub async fn toggle_reaction(
    State(state): State<AppState>,
    Path((tip_id, reaction_type)): Path<(String, String)>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ReactionStatusResponse>)> {
    // An unparseable id cannot name any stored tip
    let tip_id =
        TipId::parse(&tip_id).map_err(|_| AppError::not_found(format!("tip {tip_id}")))?;
    let kind = ReactionKind::parse(&reaction_type)
        .ok_or_else(|| DomainError::UnknownReaction(reaction_type.clone()))?;

    let (visitor_id, jar) = match VisitorIdentity::from_jar(&jar).0 {
        Some(visitor_id) => (visitor_id, jar),
        None => {
            let visitor_id = VisitorId::mint();
            (visitor_id, jar.add(visitor_cookie(visitor_id)))
        }
    };

    let service = ReactionService::new(state.service_context());
    let status = service.toggle_reaction(tip_id, visitor_id, kind).await?;
    Ok((jar, Json(status)))
}
