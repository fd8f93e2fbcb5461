//! One featured tip per calendar date.
//!
//! Chooses and memoizes one safe tip per calendar date. The choice is lazy
//! (computed by the first request that needs it) and stable: once a valid
//! pick is recorded for a date it is served unchanged for the rest of that
//! date, even if better tips arrive later.

use chrono::{NaiveDate, Utc};
use rand::seq::SliceRandom;
use tracing::instrument;

use tipjar_core::entities::Tip;
use tipjar_core::value_objects::TipId;

use crate::dto::TipResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// How many tips the selector samples when choosing a fresh pick
pub const DAILY_PICK_SAMPLE_SIZE: i64 = 100;

/// Selects, records, and serves the pick of the day.
pub struct DailyPickService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DailyPickService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The pick for the server's current date
    pub async fn todays_pick(&self) -> ServiceResult<Option<TipResponse>> {
        self.pick_for(Utc::now().date_naive()).await
    }

    /// The pick for one calendar date, selecting and recording it if needed
    ///
    /// `None` means no safe tip exists to feature, which is a valid outcome,
    /// not an error.
    #[instrument(skip(self))]
    pub async fn pick_for(&self, date: NaiveDate) -> ServiceResult<Option<TipResponse>> {
        let store = self.ctx.daily_pick_store();

        if let Some(recorded) = store.get(date).await? {
            if let Some(tip) = self.valid_pick(recorded).await? {
                return Ok(Some(TipResponse::from(&tip)));
            }

            // The recorded tip vanished or turned out unsafe. Select again
            // and overwrite, so the date is stable from here on.
            let Some(candidate) = self.select_candidate().await? else {
                return Ok(None);
            };
            store.replace(date, candidate.id).await?;
            return Ok(Some(TipResponse::from(&candidate)));
        }

        let Some(candidate) = self.select_candidate().await? else {
            return Ok(None);
        };

        if store.claim(date, candidate.id).await? {
            return Ok(Some(TipResponse::from(&candidate)));
        }

        // Lost the claim to a concurrent request; serve what the winner
        // recorded so both callers agree.
        if let Some(winner) = store.get(date).await? {
            if let Some(tip) = self.valid_pick(winner).await? {
                return Ok(Some(TipResponse::from(&tip)));
            }
        }

        // The winning pick disappeared before we could read it back; our
        // candidate still stands.
        store.replace(date, candidate.id).await?;
        Ok(Some(TipResponse::from(&candidate)))
    }

    /// Load a recorded pick, keeping it only while it exists and stays safe
    async fn valid_pick(&self, tip_id: TipId) -> ServiceResult<Option<Tip>> {
        let tip = self.ctx.tip_repo().find_by_id(tip_id).await?;
        Ok(tip.filter(Tip::is_safe))
    }

    /// Sample the store and choose one safe tip uniformly at random
    async fn select_candidate(&self) -> ServiceResult<Option<Tip>> {
        let tips = self.ctx.tip_repo().sample(DAILY_PICK_SAMPLE_SIZE).await?;
        let safe: Vec<Tip> = tips.into_iter().filter(Tip::is_safe).collect();
        Ok(safe.choose(&mut rand::thread_rng()).cloned())
    }
}
