//! Time-sortable 64-bit tip identifiers.
//!
//! A [`TipId`] packs, from high bit to low: 42 bits of milliseconds since
//! [`TipId::EPOCH`], 10 bits of worker id and a 12-bit per-millisecond
//! sequence. Later ids therefore compare greater, which the listing queries
//! lean on when they break ranking ties by recency.
//!
//! On the wire ids travel as decimal strings. JavaScript number precision
//! tops out at 2^53, so a raw 64-bit integer in JSON would silently round.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Field layout, low to high: 12-bit sequence, 10-bit worker, 42-bit millis.
const SEQ_BITS: u32 = 12;
const WORKER_BITS: u32 = 10;
const MILLIS_SHIFT: u32 = SEQ_BITS + WORKER_BITS;
const SEQ_MASK: i64 = (1_i64 << SEQ_BITS) - 1;
const WORKER_MASK: i64 = (1_i64 << WORKER_BITS) - 1;

/// Time-ordered 64-bit tip identifier.
///
/// Stored in Postgres as `BIGINT`; see [`TipId::into_inner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TipId(i64);

impl TipId {
    /// Epoch the timestamp field counts from: 2025-01-01 00:00:00 UTC.
    pub const EPOCH: i64 = 1735689600000;

    /// Wraps a raw database value.
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Unwraps to the raw `i64` the storage layer binds and persists.
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this id was minted.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> MILLIS_SHIFT) + Self::EPOCH
    }

    /// Id of the generator instance that minted this id.
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQ_BITS) & WORKER_MASK) as u16
    }

    /// Position within the minting millisecond.
    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & SEQ_MASK) as u16
    }

    /// Parses the decimal form used in URLs and JSON.
    pub fn parse(s: &str) -> Result<Self, TipIdParseError> {
        s.parse()
    }

    const fn from_parts(unix_ms: i64, worker_id: u16, sequence: i64) -> Self {
        Self(
            ((unix_ms - Self::EPOCH) << MILLIS_SHIFT)
                | ((worker_id as i64) << SEQ_BITS)
                | sequence,
        )
    }
}

/// Error for id strings that are not a base-10 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tip ids are decimal 64-bit integers")]
pub struct TipIdParseError;

impl fmt::Display for TipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TipId {
    type Err = TipIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|_| TipIdParseError)
    }
}

// JSON carries ids as strings; see the module docs.
impl Serialize for TipId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TipId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Both encodings are accepted so hand-written clients that send
        // bare integers keep working.
        deserializer.deserialize_any(StringOrInt)
    }
}

struct StringOrInt;

impl Visitor<'_> for StringOrInt {
    type Value = TipId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a tip id as a decimal string or integer")
    }

    fn visit_i64<E: de::Error>(self, raw: i64) -> Result<TipId, E> {
        Ok(TipId(raw))
    }

    fn visit_u64<E: de::Error>(self, raw: u64) -> Result<TipId, E> {
        i64::try_from(raw)
            .map(TipId)
            .map_err(|_| E::custom("tip id out of i64 range"))
    }

    fn visit_str<E: de::Error>(self, raw: &str) -> Result<TipId, E> {
        raw.parse().map_err(E::custom)
    }
}

/// Lock-free generator handing out unique [`TipId`]s.
///
/// The whole generator state lives in one atomic word shaped as
/// `unix_millis << 12 | sequence`. Each call claims a (millisecond,
/// sequence) slot with a compare-exchange, so two threads can never mint
/// the same id.
pub struct TipIdGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl TipIdGenerator {
    /// # Panics
    /// Panics when `worker_id` does not fit the 10-bit field.
    pub fn new(worker_id: u16) -> Self {
        assert!(
            i64::from(worker_id) <= WORKER_MASK,
            "worker id must fit in 10 bits"
        );
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Mints the next id. Never blocks, at worst it retries the claim.
    pub fn generate(&self) -> TipId {
        loop {
            let now = unix_millis();
            let seen = self.state.load(Ordering::Acquire);
            let (last_ms, last_seq) = (seen >> SEQ_BITS, seen & SEQ_MASK);

            // The clock may stall or step backwards, and the sequence may
            // run out mid-millisecond. Either way the next slot must not
            // sort below the previous one.
            let (ms, seq) = if now > last_ms {
                (now, 0)
            } else if last_seq < SEQ_MASK {
                (last_ms, last_seq + 1)
            } else {
                (last_ms + 1, 0)
            };

            let claim = (ms << SEQ_BITS) | seq;
            if self
                .state
                .compare_exchange(seen, claim, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return TipId::from_parts(ms, self.worker_id, seq);
            }
            // Lost the race for this slot; take the next one.
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

fn unix_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        // Pre-1970 clocks do not happen on the platforms this runs on.
        Err(_) => 0,
    }
}
