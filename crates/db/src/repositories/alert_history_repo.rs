//! Repository for the append-only `alert_history` table.

use sqlx::PgPool;
use vigie_core::types::AlertId;

use crate::models::alert_history::AlertHistoryEntry;

const COLUMNS: &str =
    "id, alert_id, action, previous_status, new_status, performed_by, performed_at";

/// Read access to the audit trail. Inserts happen inside the alert
/// transition transaction, not here.
pub struct AlertHistoryRepo;

impl AlertHistoryRepo {
    /// All history rows for one alert, oldest first.
    pub async fn list_for_alert(
        pool: &PgPool,
        alert_id: AlertId,
    ) -> Result<Vec<AlertHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alert_history \
             WHERE alert_id = $1 \
             ORDER BY performed_at ASC, id ASC"
        );
        sqlx::query_as::<_, AlertHistoryEntry>(&query)
            .bind(alert_id)
            .fetch_all(pool)
            .await
    }
}
