//! # tipjar-api
//!
//! The HTTP edge of the tips server: axum handlers for the front page,
//! tip submission, section listings and reaction toggles, plus the
//! middleware stack and the process entry point in [`server`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
