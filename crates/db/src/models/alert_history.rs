//! Audit-history entity model. Rows are append-only, one per status
//! transition, and never updated.

use serde::Serialize;
use sqlx::FromRow;
use vigie_core::types::{AlertId, HistoryId, Timestamp};

/// A row from the `alert_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertHistoryEntry {
    pub id: HistoryId,
    pub alert_id: AlertId,
    pub action: String,
    /// Raw stored form of the status before the transition (`open`, not
    /// `new`).
    pub previous_status: Option<String>,
    pub new_status: String,
    pub performed_by: String,
    pub performed_at: Timestamp,
}
