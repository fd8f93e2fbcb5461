//! Tip listing handlers
//!
//! One endpoint serving the three listing sections.

use axum::{
    extract::{Path, State},
    Json,
};
use tipjar_core::{DomainError, ListSection};
use tipjar_service::{TipResponse, TipService};

use crate::extractors::VisitorIdentity;
use crate::response::ApiResult;
use crate::state::AppState;

/// List one section of tips, annotated for the viewer
///
/// GET /get-tips/{section}
///
/// Reading never mints an identity; without a cookie every tip comes back
/// with `liked` and `disliked` false.
pub async fn get_tips(
    State(state): State<AppState>,
    Path(section): Path<String>,
    visitor: VisitorIdentity,
) -> ApiResult<Json<Vec<TipResponse>>> {
    let section = ListSection::parse(&section)
        .ok_or_else(|| DomainError::UnknownSection(section.clone()))?;

    let service = TipService::new(state.service_context());
    let tips = service.list_tips(section, visitor.0).await?;
    Ok(Json(tips))
}
