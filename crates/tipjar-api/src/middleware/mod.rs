//! Middleware stack for the API server.
//!
//! Request IDs, tracing, timeouts, gzip, CORS, and the global rate limiter.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use tipjar_common::{CorsConfig, RateLimitConfig};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::state::AppState;

/// Header that carries the per-request UUID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Time before the server gives up on a request and answers 503.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate-limit the router.
///
/// Applied to the public routes only, so health probes are never throttled.
pub fn apply_rate_limit(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    // GlobalKeyExtractor draws every request from one bucket, not per-IP ones
    let governor = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.requests_per_second.into())
            .burst_size(config.burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("rate limiter rejects zero rates"),
    );

    router.layer(GovernorLayer { config: governor })
}

/// Wrap the router in the shared layer stack.
///
/// Outermost first: request-id set and propagate, tracing, timeout, gzip,
/// CORS.
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            // Answers 503 instead of hanging forever
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            ))
            .layer(CompressionLayer::new())
            .layer(cors_layer(cors_config, is_production)),
    )
}

/// Span for one HTTP request, tagged with the propagated request id.
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// CORS for a JSON API that browsers read with GET and write with POST.
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, request_id.clone()])
        .expose_headers([request_id])
        .allow_origin(resolve_origins(config, is_production))
}

/// Explicit origins when configured; wide open in development; closed (with
/// a warning) when production ships without any.
fn resolve_origins(config: &CorsConfig, is_production: bool) -> AllowOrigin {
    if !is_production && config.allowed_origins.is_empty() {
        tracing::warn!("CORS allows any origin; set CORS_ALLOWED_ORIGINS before deploying");
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Dropping unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        // An empty list refuses every cross-origin browser request
        tracing::warn!("No usable CORS origins configured; browsers will be refused");
    } else {
        tracing::info!(count = origins.len(), "CORS restricted to configured origins");
    }

    AllowOrigin::list(origins)
}
