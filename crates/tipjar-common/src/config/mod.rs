//! Runtime configuration.

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, IdConfig,
    RateLimitConfig, RedisConfig, ServerConfig,
};
