//! Postgres-backed tip storage.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tipjar_core::entities::Tip;
use tipjar_core::traits::{RepoResult, TipRepository};
use tipjar_core::value_objects::TipId;

use crate::mappers::TipInsert;
use crate::models::TipModel;

use super::error::map_db_error;

const SELECT_BY_ID: &str = r"
    SELECT id, author, handle, body, likes, dislikes, created_at
    FROM tips
    WHERE id = $1
";

const INSERT_TIP: &str = r"
    INSERT INTO tips (id, author, handle, body, likes, dislikes, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
";

// TABLESAMPLE can come back empty on small tables; ORDER BY RANDOM() is
// exact and the working set is capped by the limit.
const SAMPLE_RANDOM: &str = r"
    SELECT id, author, handle, body, likes, dislikes, created_at
    FROM tips
    ORDER BY RANDOM()
    LIMIT $1
";

const ORDER_BY_LIKES: &str = r"
    SELECT id, author, handle, body, likes, dislikes, created_at
    FROM tips
    ORDER BY likes DESC, id DESC
    LIMIT $1
";

const ORDER_BY_RECENCY: &str = r"
    SELECT id, author, handle, body, likes, dislikes, created_at
    FROM tips
    ORDER BY created_at DESC, id DESC
    LIMIT $1
";

/// Tip persistence on Postgres.
///
/// Row layout lives in `migrations/`; [`TipModel`] mirrors it 1:1 and the
/// mappers convert to the domain entity at the boundary.
#[derive(Clone)]
pub struct PgTipRepository {
    pool: PgPool,
}

impl PgTipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs one of the LIMIT-parameterized listing queries.
    async fn page(&self, sql: &'static str, limit: i64) -> RepoResult<Vec<Tip>> {
        let rows = sqlx::query_as::<_, TipModel>(sql)
            .bind(limit.clamp(1, 100))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Tip::from).collect())
    }
}

#[async_trait]
impl TipRepository for PgTipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TipId) -> RepoResult<Option<Tip>> {
        let row = sqlx::query_as::<_, TipModel>(SELECT_BY_ID)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Tip::from))
    }

    #[instrument(skip(self, tip), fields(id = %tip.id))]
    async fn create(&self, tip: &Tip) -> RepoResult<()> {
        let insert = TipInsert::new(tip);

        sqlx::query(INSERT_TIP)
            .bind(insert.id)
            .bind(insert.author)
            .bind(insert.handle)
            .bind(insert.body)
            .bind(tip.likes)
            .bind(tip.dislikes)
            .bind(tip.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn sample(&self, limit: i64) -> RepoResult<Vec<Tip>> {
        self.page(SAMPLE_RANDOM, limit).await
    }

    #[instrument(skip(self))]
    async fn top_by_likes(&self, limit: i64) -> RepoResult<Vec<Tip>> {
        self.page(ORDER_BY_LIKES, limit).await
    }

    #[instrument(skip(self))]
    async fn latest(&self, limit: i64) -> RepoResult<Vec<Tip>> {
        self.page(ORDER_BY_RECENCY, limit).await
    }
}
