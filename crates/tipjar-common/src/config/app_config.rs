//! Runtime configuration.
//!
//! All settings come from environment variables; a `.env` file is honored for
//! local development. [`AppConfig::from_env`] is the only constructor the
//! binary uses.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Everything the server needs to boot, grouped by concern.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub id_gen: IdConfig,
}

/// Identity of the running process.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "defaults::app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Deployment environment. Development is the default everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::bind_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// PostgreSQL settings. Pool tuning beyond these sizes uses the db layer's
/// stock values.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "defaults::db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "defaults::db_min_connections")]
    pub min_connections: u32,
}

/// Redis settings for the daily pick store.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "defaults::redis_max_connections")]
    pub max_connections: u32,
}

/// Global rate limiter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "defaults::requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "defaults::burst")]
    pub burst: u32,
}

/// Origins allowed by CORS. Empty means "any" in development and is a boot
/// error in production.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Tip ID generator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub worker_id: u16,
}

mod defaults {
    pub(super) fn app_name() -> String {
        "tipjar".to_string()
    }

    pub(super) fn bind_host() -> String {
        "0.0.0.0".to_string()
    }

    pub(super) fn db_max_connections() -> u32 {
        16
    }

    pub(super) fn db_min_connections() -> u32 {
        2
    }

    pub(super) fn redis_max_connections() -> u32 {
        8
    }

    pub(super) fn requests_per_second() -> u32 {
        10
    }

    pub(super) fn burst() -> u32 {
        40
    }
}

/// Read a variable that must be present.
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// Read and parse a variable that must be present.
fn parsed<T: FromStr>(name: &'static str) -> Result<T, ConfigError> {
    let raw = required(name)?;
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw))
}

/// Read and parse an optional variable, falling back on absence or garbage.
fn parsed_or<T: FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Fails when a required variable is absent, or a present one cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; deployments set variables directly.
        let _ = dotenvy::dotenv();

        let env_kind = match env::var("APP_ENV") {
            Ok(raw) => raw.parse()?,
            Err(_) => Environment::default(),
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| defaults::app_name()),
                env: env_kind,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| defaults::bind_host()),
                port: parsed("API_PORT")?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or(
                    "DATABASE_MAX_CONNECTIONS",
                    defaults::db_max_connections(),
                ),
                min_connections: parsed_or(
                    "DATABASE_MIN_CONNECTIONS",
                    defaults::db_min_connections(),
                ),
            },
            redis: RedisConfig {
                url: required("REDIS_URL")?,
                max_connections: parsed_or(
                    "REDIS_MAX_CONNECTIONS",
                    defaults::redis_max_connections(),
                ),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    defaults::requests_per_second(),
                ),
                burst: parsed_or("RATE_LIMIT_BURST", defaults::burst()),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            id_gen: IdConfig {
                worker_id: parsed_or("WORKER_ID", 0),
            },
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {0} has invalid value {1:?}")]
    InvalidValue(&'static str, String),
}
