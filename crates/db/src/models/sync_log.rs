//! Sync-log entity model. Written by the rule engine after each
//! evaluation run; read-only here.

use serde::Serialize;
use sqlx::FromRow;
use vigie_core::types::Timestamp;

/// A row from the `sync_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncLog {
    pub id: i64,
    /// Data source of the run (`diabolocom_api` or `mysql`).
    pub source: String,
    /// Run outcome (`success` or `error`).
    pub status: String,
    pub records_fetched: i32,
    pub alerts_generated: i32,
    pub duration_ms: i32,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
}
