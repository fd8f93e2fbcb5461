//! # tipjar-db
//!
//! PostgreSQL backing for the repository traits in `tipjar-core`.
//!
//! The crate is split the same way the data flows: `pool` opens the shared
//! connection pool, `models` mirror table rows via SQLx `FromRow`, `mappers`
//! translate rows into domain entities, and `repositories` run the queries.
//! The reaction ledger lives here too, with its conditional writes and
//! clamped counter updates.
//!
//! ```rust,ignore
//! use tipjar_db::{create_pool, PgTipRepository, PoolSettings};
//! use tipjar_core::traits::TipRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolSettings::for_url("postgresql://...")).await?;
//!     let tips = PgTipRepository::new(pool);
//!     // query away
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, PgPool, PoolSettings};
pub use repositories::{PgReactionRepository, PgTipRepository};
