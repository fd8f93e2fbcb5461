//! Connection pool setup.

mod postgres;

pub use postgres::{create_pool, PoolSettings};

// Re-export PgPool so callers need no direct sqlx import
pub use sqlx::postgres::PgPool;
