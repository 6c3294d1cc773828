//! Rule catalog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigie_core::types::{RuleId, Timestamp};

/// A row from the `rules` table. Rules are authored by the engine's
/// operators; this service reads them and toggles `is_active` only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub description: Option<String>,
    pub rule_type: Option<String>,
    /// Catalog severity (`critical`/`warning`/`info`). Authoritative;
    /// missing values display as `info`.
    pub severity: Option<String>,
    pub is_active: bool,
    pub conditions: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Request body for `PATCH /rules/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetRuleActive {
    pub is_active: bool,
}
