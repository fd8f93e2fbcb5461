//! JSON payloads returned by the API.
//!
//! Tip ids leave as strings because JavaScript number precision stops at
//! 2^53 and would silently round the raw 64-bit values.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A tip annotated with the viewer's own reaction state.
#[derive(Debug, Clone, Serialize)]
pub struct TipResponse {
    pub id: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub body: String,
    pub likes: i64,
    pub dislikes: i64,
    pub liked: bool,
    pub disliked: bool,
    pub created_at: DateTime<Utc>,
}

/// Front page payload: the daily pick, when one exists.
#[derive(Debug, Clone, Serialize)]
pub struct FrontPageResponse {
    pub daily_pick: Option<TipResponse>,
}

/// Post-transition reaction state returned from the toggle endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionStatusResponse {
    pub likes: i64,
    pub dislikes: i64,
    pub liked: bool,
    pub disliked: bool,
}

/// Liveness payload: the process is up and answering.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }
}

/// Readiness payload with one entry per backing store.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    status: ReadyState,
    timestamp: DateTime<Utc>,
    checks: StoreChecks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum ReadyState {
    Ready,
    NotReady,
}

#[derive(Debug, Clone, Serialize)]
struct StoreChecks {
    database: StoreStatus,
    redis: StoreStatus,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum StoreStatus {
    Healthy,
    Unhealthy,
}

impl From<bool> for StoreStatus {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Healthy
        } else {
            Self::Unhealthy
        }
    }
}

impl ReadinessResponse {
    /// Builds the payload from the two store probes.
    pub fn ready(database_ok: bool, redis_ok: bool) -> Self {
        let status = if database_ok && redis_ok {
            ReadyState::Ready
        } else {
            ReadyState::NotReady
        };
        Self {
            status,
            timestamp: Utc::now(),
            checks: StoreChecks {
                database: database_ok.into(),
                redis: redis_ok.into(),
            },
        }
    }

    /// Whether every store answered its probe.
    pub fn is_ready(&self) -> bool {
        self.status == ReadyState::Ready
    }
}
