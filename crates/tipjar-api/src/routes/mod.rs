//! URL table for the public API and the health probes.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{front, health, reactions, tips};
use crate::state::AppState;

/// Routes that sit behind the shared rate limiter.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(front::front_page).post(front::submit_tip))
        .route("/get-tips/:section", get(tips::get_tips))
        .route(
            "/toggle_reaction/:tip_id/:reaction_type",
            post(reactions::toggle_reaction),
        )
}

/// Probe routes, kept apart so orchestrators are never rate limited.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
