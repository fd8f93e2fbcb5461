//! Daily pick storage in Redis.
//!
//! One tip is featured per calendar date. The first server to claim a date
//! wins, every later claim for the same date loses and reads the winner back,
//! so all servers feature the same tip no matter who sampled what.

use chrono::NaiveDate;

use tipjar_core::value_objects::TipId;

use crate::pool::{RedisPool, RedisResult};

const DAILY_PICK_PREFIX: &str = "daily_pick:";

/// Picks expire after two days, long enough to cover the date they name.
const DAILY_PICK_TTL: u64 = 2 * 24 * 60 * 60;

/// Store for the memoized pick of the day.
#[derive(Clone)]
pub struct DailyPickStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl DailyPickStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DAILY_PICK_TTL,
        }
    }

    /// Keys look like `daily_pick:2026-08-23`.
    fn key(date: NaiveDate) -> String {
        format!("{DAILY_PICK_PREFIX}{}", date.format("%Y-%m-%d"))
    }

    /// The recorded pick for a date, if any claim has landed yet.
    pub async fn get(&self, date: NaiveDate) -> RedisResult<Option<TipId>> {
        let key = Self::key(date);
        self.pool.fetch_json(&key).await
    }

    /// Record a pick for a date only if none is recorded yet.
    ///
    /// Returns whether our candidate won. On `false` a concurrent claim got
    /// there first and the caller should read the winner back with [`get`].
    ///
    /// [`get`]: Self::get
    pub async fn claim(&self, date: NaiveDate, tip_id: TipId) -> RedisResult<bool> {
        let key = Self::key(date);
        let serialized = serde_json::to_string(&tip_id)?;
        let mut conn = self.pool.get().await?;

        // SET NX EX is a single atomic claim; a nil reply means we lost
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&serialized)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async(&mut conn)
            .await?;

        let won = reply.is_some();
        if won {
            tracing::info!(date = %date, tip_id = %tip_id, "Claimed daily pick");
        }

        Ok(won)
    }

    /// Overwrite the recorded pick for a date.
    ///
    /// Only for the path where the recorded tip no longer qualifies (it was
    /// deleted or its content turned out unsafe); fresh dates go through
    /// [`claim`] so concurrent servers cannot fight over them.
    ///
    /// [`claim`]: Self::claim
    pub async fn replace(&self, date: NaiveDate, tip_id: TipId) -> RedisResult<()> {
        let key = Self::key(date);
        self.pool.put_json(&key, &tip_id, self.ttl_seconds).await?;

        tracing::info!(date = %date, tip_id = %tip_id, "Replaced daily pick");

        Ok(())
    }
}
