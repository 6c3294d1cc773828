//! Repository for the `alerts` table, including the status-transition
//! write path (row update + audit insert in one transaction).

use sqlx::PgPool;
use vigie_core::status::{transition_action, AlertStatus};
use vigie_core::types::{AlertId, RuleId, Timestamp};

use crate::models::alert::{Alert, AlertEvent};

/// Column list for `alerts` queries.
const COLUMNS: &str = "\
    id, rule_id, status, detected_at, resolved_at, resolved_by, \
    campaign, lead_id, priority, tries_number, call_duration, \
    closing_code, phone, email, first_name, last_name, full_name, \
    agent_name, created_at_lead, last_updated_at, last_call_time, \
    retry_date, state, excluded_detail, lead_source, call_history, \
    system_id, alert_data";

/// Error type for the transition write path.
///
/// Illegal transitions are rejected here, at the store boundary, rather
/// than being left to the UI.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Alert {0} not found")]
    NotFound(AlertId),

    #[error("Alert {id} has unrecognized stored status '{status}'")]
    UnknownStatus { id: AlertId, status: String },

    #[error("Illegal status transition: {} -> {}", .from.as_str(), .to.as_str())]
    Illegal { from: AlertStatus, to: AlertStatus },
}

/// Provides read and transition operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Fetch the most recent alerts, newest first. `limit` bounds the
    /// window the list view filters over (500 in production).
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts ORDER BY detected_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fetch one alert by id.
    pub async fn find_by_id(pool: &PgPool, id: AlertId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch all open alerts (`open` or `acknowledged`), newest first.
    pub async fn list_open(pool: &PgPool) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE status IN ('open', 'acknowledged') \
             ORDER BY detected_at DESC"
        );
        sqlx::query_as::<_, Alert>(&query).fetch_all(pool).await
    }

    /// Count open alerts per rule, for the catalog listing.
    pub async fn count_open_by_rule(pool: &PgPool) -> Result<Vec<(RuleId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (RuleId, i64)>(
            "SELECT rule_id, COUNT(*) FROM alerts \
             WHERE status IN ('open', 'acknowledged') \
             GROUP BY rule_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Count alerts resolved at or after the given instant.
    pub async fn count_resolved_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts \
             WHERE status = 'resolved' AND resolved_at >= $1",
        )
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// Detection events since an instant, oldest first (trend series).
    pub async fn list_detected_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<AlertEvent>, sqlx::Error> {
        sqlx::query_as::<_, AlertEvent>(
            "SELECT rule_id, detected_at FROM alerts \
             WHERE detected_at >= $1 \
             ORDER BY detected_at ASC",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Count detections in a half-open window (previous trend period).
    pub async fn count_detected_between(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts \
             WHERE detected_at >= $1 AND detected_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
    }

    /// Transition one alert to a new status.
    ///
    /// Validates the lifecycle state machine, updates the row (setting
    /// `resolved_at`/`resolved_by` on resolve, clearing them on reopen)
    /// and appends exactly one audit-history row, all in a single
    /// transaction. The row is locked for the duration so concurrent
    /// transitions serialize.
    pub async fn transition(
        pool: &PgPool,
        id: AlertId,
        to: AlertStatus,
        actor: &str,
    ) -> Result<Alert, TransitionError> {
        let mut tx = pool.begin().await?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT status FROM alerts WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (raw_status,) = current.ok_or(TransitionError::NotFound(id))?;

        let from = AlertStatus::parse(&raw_status).ok_or_else(|| {
            TransitionError::UnknownStatus {
                id,
                status: raw_status.clone(),
            }
        })?;
        let action = transition_action(from, to).ok_or(TransitionError::Illegal { from, to })?;

        let update = format!(
            "UPDATE alerts SET \
                 status = $2, \
                 resolved_at = CASE \
                     WHEN $2 = 'resolved' THEN NOW() \
                     WHEN $2 = 'open' THEN NULL \
                     ELSE resolved_at END, \
                 resolved_by = CASE \
                     WHEN $2 = 'resolved' THEN $3 \
                     WHEN $2 = 'open' THEN NULL \
                     ELSE resolved_by END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Alert>(&update)
            .bind(id)
            .bind(to.as_raw())
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO alert_history \
                 (alert_id, action, previous_status, new_status, performed_by) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(action.as_str())
        .bind(&raw_status)
        .bind(to.as_raw())
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            alert_id = %id,
            from = from.as_str(),
            to = to.as_str(),
            action = action.as_str(),
            actor,
            "Alert status transition"
        );

        Ok(updated)
    }
}
