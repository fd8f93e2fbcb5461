//! Server wiring.
//!
//! Builds the axum application out of its layers and runs it until a
//! shutdown signal arrives.

use std::sync::Arc;

use axum::Router;
use tipjar_cache::{RedisPool, RedisPoolConfig};
use tipjar_common::{AppConfig, AppError, AppResult};
use tipjar_core::TipIdGenerator;
use tipjar_db::{create_pool, PgReactionRepository, PgTipRepository, PoolSettings};
use tipjar_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes merge in outside the rate limiter so monitoring is never
/// throttled; everything else shares the full stack.
pub fn create_app(state: AppState) -> Router {
    let rate_limit = state.config().rate_limit.clone();
    let cors = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    let router = apply_rate_limit(create_router(), &rate_limit).merge(health_routes());
    let router = apply_middleware(router, &cors, is_production);
    router.with_state(state)
}

/// Connect to the stores and wire up the service layer.
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let db_settings = PoolSettings {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..PoolSettings::for_url(config.database.url.clone())
    };
    let pool = create_pool(&db_settings)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Postgres pool ready");

    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool ready");

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(redis_pool)
        .tip_repo(Arc::new(PgTipRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool)))
        .id_generator(Arc::new(TipIdGenerator::new(config.id_gen.worker_id)))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on `addr` until ctrl-c or SIGTERM.
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {addr}: {e}")))?;

    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Boot the whole stack from configuration.
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    run_server(create_app(state), &addr).await
}

/// Resolve when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("ctrl-c handler installation failed");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation failed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Ctrl-c received, draining"),
        () = terminate => info!("SIGTERM received, draining"),
    }
}
