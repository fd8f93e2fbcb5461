//! Dependency wiring for the service layer.

use std::sync::Arc;

use tipjar_cache::{DailyPickStore, RedisPool};
use tipjar_core::traits::{ReactionRepository, TipRepository};
use tipjar_core::value_objects::{TipId, TipIdGenerator};
use tipjar_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Everything the services depend on, bundled behind one handle.
///
/// Cloning bumps a single reference count, so handlers can keep a copy per
/// request without touching the underlying pools.
#[derive(Clone)]
pub struct ServiceContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    pool: PgPool,
    redis_pool: RedisPool,
    tip_repo: Arc<dyn TipRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    daily_pick_store: DailyPickStore,
    id_generator: Arc<TipIdGenerator>,
}

impl ServiceContext {
    /// Postgres pool, exposed for the readiness probe.
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Redis pool, exposed for the readiness probe.
    pub fn redis_pool(&self) -> &RedisPool {
        &self.inner.redis_pool
    }

    pub fn tip_repo(&self) -> &dyn TipRepository {
        self.inner.tip_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.inner.reaction_repo.as_ref()
    }

    pub fn daily_pick_store(&self) -> &DailyPickStore {
        &self.inner.daily_pick_store
    }

    /// Mints the id for a new tip.
    pub fn generate_id(&self) -> TipId {
        self.inner.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Pools and repositories have no Debug output worth printing.
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

/// Step-by-step construction for [`ServiceContext`].
///
/// All five dependencies are required; [`build`](Self::build) reports the
/// first one left unset.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    tip_repo: Option<Arc<dyn TipRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    id_generator: Option<Arc<TipIdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn tip_repo(mut self, repo: Arc<dyn TipRepository>) -> Self {
        self.tip_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn id_generator(mut self, generator: Arc<TipIdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self.pool.ok_or_else(|| missing("pool"))?;
        let redis_pool = self.redis_pool.ok_or_else(|| missing("redis_pool"))?;
        let inner = ContextInner {
            daily_pick_store: DailyPickStore::new(redis_pool.clone()),
            pool,
            redis_pool,
            tip_repo: self.tip_repo.ok_or_else(|| missing("tip_repo"))?,
            reaction_repo: self.reaction_repo.ok_or_else(|| missing("reaction_repo"))?,
            id_generator: self.id_generator.ok_or_else(|| missing("id_generator"))?,
        };
        Ok(ServiceContext {
            inner: Arc::new(inner),
        })
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::internal(format!("service context is missing {dependency}"))
}
