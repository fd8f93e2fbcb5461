//! # tipjar-common
//!
//! Cross-cutting pieces shared by every crate above the domain: runtime
//! configuration, the application error type, and tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

// Crate-root re-exports so callers skip the module paths
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, IdConfig,
    RateLimitConfig, RedisConfig, ServerConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, TracingConfig, TracingError,
};
