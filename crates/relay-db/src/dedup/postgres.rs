//! PostgreSQL implementation of DedupStore

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::instrument;

use relay_core::{DedupStore, IdempotencyKey, RecordOutcome, StoreError, StoreResult};

use super::error::map_db_error;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL implementation of DedupStore
///
/// Uniqueness is enforced by the primary key on `processed_events.key`, so
/// concurrent commits from several relay instances settle in the database.
#[derive(Clone)]
pub struct PgDedupStore {
    pool: PgPool,
}

impl PgDedupStore {
    /// Create a new PgDedupStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations
    ///
    /// The migrator holds a Postgres advisory lock while it runs, so
    /// instances starting together apply the schema one at a time.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {e}")))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DedupStore for PgDedupStore {
    #[instrument(skip(self), fields(key = %key))]
    async fn seen(&self, key: &IdempotencyKey) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM processed_events WHERE key = $1)
            "#,
        )
        .bind(key.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn record(&self, key: &IdempotencyKey) -> StoreResult<RecordOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO processed_events (key)
            VALUES ($1)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(if result.rows_affected() == 1 {
            RecordOutcome::Inserted
        } else {
            RecordOutcome::AlreadyPresent
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
