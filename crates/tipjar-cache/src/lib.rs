//! # tipjar-cache
//!
//! Redis caching layer for the daily pick.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Daily Pick**: One memoized featured tip per calendar date, claimed
//!   with a set-if-absent write so concurrent servers agree on a single pick
//!
//! ## Example
//!
//! ```ignore
//! use tipjar_cache::{DailyPickStore, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let picks = DailyPickStore::new(pool);
//!
//! let today = chrono::Utc::now().date_naive();
//! if picks.claim(today, tip_id).await? {
//!     // this server's candidate became the pick of the day
//! }
//! let pick = picks.get(today).await?;
//! ```

pub mod daily_pick;
pub mod pool;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export daily pick types
pub use daily_pick::DailyPickStore;
