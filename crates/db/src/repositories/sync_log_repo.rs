//! Repository for the `sync_logs` table.

use sqlx::PgPool;

use crate::models::sync_log::SyncLog;

const COLUMNS: &str = "id, source, status, records_fetched, alerts_generated, \
     duration_ms, error_message, created_at";

/// Read access to engine run logs.
pub struct SyncLogRepo;

impl SyncLogRepo {
    /// Most recent runs, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<SyncLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sync_logs ORDER BY created_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, SyncLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The single latest run, if any.
    pub async fn latest(pool: &PgPool) -> Result<Option<SyncLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sync_logs ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, SyncLog>(&query).fetch_optional(pool).await
    }
}
