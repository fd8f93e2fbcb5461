//! Front page handlers
//!
//! The page-render document and the submission form target.

use axum::{extract::State, response::Redirect, Json};
use tipjar_service::{CreateTipRequest, DailyPickService, FrontPageResponse, TipService};

use crate::extractors::ValidatedForm;
use crate::response::ApiResult;
use crate::state::AppState;

/// Front page document, carrying the daily pick when one exists
///
/// GET /
pub async fn front_page(State(state): State<AppState>) -> ApiResult<Json<FrontPageResponse>> {
    let service = DailyPickService::new(state.service_context());
    let daily_pick = service.todays_pick().await?;
    Ok(Json(FrontPageResponse { daily_pick }))
}

/// Accept the submission form and bounce back to the front page
///
/// POST /
///
/// Oversized or unsafe submissions are rejected before anything is written;
/// accepted ones answer with a 303 redirect to `/`.
pub async fn submit_tip(
    State(state): State<AppState>,
    ValidatedForm(request): ValidatedForm<CreateTipRequest>,
) -> ApiResult<Redirect> {
    let service = TipService::new(state.service_context());
    service.create_tip(request).await?;
    Ok(Redirect::to("/"))
}
