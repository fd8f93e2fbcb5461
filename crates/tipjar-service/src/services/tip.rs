//! Tip submission and the three listing views (feed, trending, new).

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, instrument};

use tipjar_core::entities::{ReactionKind, Tip};
use tipjar_core::error::DomainError;
use tipjar_core::safety;
use tipjar_core::value_objects::{ListSection, TipId, VisitorId};

use crate::dto::{AnnotatedTip, CreateTipRequest, TipResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// How many tips the feed samples before shuffling
pub const FEED_SAMPLE_SIZE: i64 = 50;

/// Page size for every listing view
pub const PAGE_SIZE: usize = 10;

/// Accepts submissions and serves the listing views.
pub struct TipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist a screened submission as a new tip.
    ///
    /// Length rules are enforced on the DTO before this point; here the
    /// submission is screened against the safety filter so nothing resembling
    /// a script-injection payload is ever written.
    #[instrument(skip(self, request))]
    pub async fn create_tip(&self, request: CreateTipRequest) -> ServiceResult<TipResponse> {
        screen_submission(&request)?;

        let tip = Tip::new(
            self.ctx.generate_id(),
            request.username.clone(),
            request.handle().map(String::from),
            request.content.clone(),
        );

        if tip.is_empty() {
            return Err(DomainError::ValidationError(
                "Tip content must not be blank".to_string(),
            )
            .into());
        }

        self.ctx.tip_repo().create(&tip).await?;

        info!(tip_id = %tip.id, "Tip created");

        Ok(TipResponse::from(&tip))
    }

    /// List tips for one section, annotated with the viewer's reactions
    ///
    /// The feed shuffles a bounded sample, so it is a fair shuffle of the
    /// working set rather than of the whole store once the store outgrows
    /// the sample size. Trending and new truncate at the query and filter
    /// afterwards, so those pages may come back short of [`PAGE_SIZE`].
    #[instrument(skip(self))]
    pub async fn list_tips(
        &self,
        section: ListSection,
        viewer: Option<VisitorId>,
    ) -> ServiceResult<Vec<TipResponse>> {
        let tips = match section {
            ListSection::Feed => {
                let sampled = self.ctx.tip_repo().sample(FEED_SAMPLE_SIZE).await?;
                let mut rng = rand::thread_rng();
                assemble_feed(sampled, &mut rng)
            }
            ListSection::Trending => {
                let page = self.ctx.tip_repo().top_by_likes(PAGE_SIZE as i64).await?;
                retain_safe(page)
            }
            ListSection::New => {
                let page = self.ctx.tip_repo().latest(PAGE_SIZE as i64).await?;
                retain_safe(page)
            }
        };

        self.annotate(tips, viewer).await
    }

    /// Attach the viewer's own ledger entries to a page of tips
    async fn annotate(
        &self,
        tips: Vec<Tip>,
        viewer: Option<VisitorId>,
    ) -> ServiceResult<Vec<TipResponse>> {
        let Some(visitor_id) = viewer else {
            return Ok(tips.iter().map(TipResponse::from).collect());
        };

        let ids: Vec<TipId> = tips.iter().map(|tip| tip.id).collect();
        let reactions = self
            .ctx
            .reaction_repo()
            .find_for_tips(visitor_id, &ids)
            .await?;

        let held: HashMap<TipId, ReactionKind> = reactions
            .into_iter()
            .map(|reaction| (reaction.tip_id, reaction.kind))
            .collect();

        Ok(tips
            .into_iter()
            .map(|tip| {
                let viewer_reaction = held.get(&tip.id).copied();
                TipResponse::from(AnnotatedTip {
                    tip,
                    viewer_reaction,
                })
            })
            .collect())
    }
}

/// Screen every submitted field against the safety filter
fn screen_submission(request: &CreateTipRequest) -> Result<(), DomainError> {
    if safety::is_suspicious(&request.username) {
        return Err(DomainError::UnsafeContent { field: "username" });
    }
    if let Some(handle) = request.handle() {
        if safety::is_suspicious(handle) {
            return Err(DomainError::UnsafeContent {
                field: "twitter_username",
            });
        }
    }
    if safety::is_suspicious(&request.content) {
        return Err(DomainError::UnsafeContent { field: "content" });
    }
    Ok(())
}

/// Feed assembly: shuffle the working set, drop unsafe tips, take a page
fn assemble_feed<R: Rng>(mut tips: Vec<Tip>, rng: &mut R) -> Vec<Tip> {
    tips.shuffle(rng);
    let mut page = retain_safe(tips);
    page.truncate(PAGE_SIZE);
    page
}

/// Keep only tips whose author and body clear the safety filter
fn retain_safe(mut tips: Vec<Tip>) -> Vec<Tip> {
    tips.retain(Tip::is_safe);
    tips
}
