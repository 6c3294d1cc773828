//! Alert entity model and status-update DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigie_core::types::{AlertId, RuleId, Timestamp};

/// A row from the `alerts` table.
///
/// The engine writes these; everything past `lead_id` is loose context
/// that varies by rule and must never be assumed present. The wide
/// optional layout mirrors the store schema one-to-one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: AlertId,
    pub rule_id: RuleId,
    pub status: String,
    pub detected_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<String>,
    pub campaign: Option<String>,
    pub lead_id: Option<String>,
    pub priority: Option<i32>,
    pub tries_number: Option<i32>,
    pub call_duration: Option<i32>,
    pub closing_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub agent_name: Option<String>,
    pub created_at_lead: Option<Timestamp>,
    pub last_updated_at: Option<Timestamp>,
    pub last_call_time: Option<Timestamp>,
    pub retry_date: Option<Timestamp>,
    pub state: Option<String>,
    pub excluded_detail: Option<String>,
    pub lead_source: Option<String>,
    pub call_history: Option<serde_json::Value>,
    pub system_id: Option<String>,
    pub alert_data: Option<serde_json::Value>,
}

/// Minimal projection used by the trend aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct AlertEvent {
    pub rule_id: RuleId,
    pub detected_at: Timestamp,
}

/// Request body for a single-alert status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateAlertStatus {
    /// Target status, display or raw form (`new`/`open` both accepted).
    pub status: String,
    /// Actor recorded in the audit trail; the server default applies
    /// when omitted.
    pub performed_by: Option<String>,
}

/// Request body for a bulk status transition.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateStatus {
    pub ids: Vec<AlertId>,
    pub status: String,
    pub performed_by: Option<String>,
}
