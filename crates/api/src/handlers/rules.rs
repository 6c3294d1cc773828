//! Handlers for the `/rules` resource: catalog listing with open-alert
//! counts, and the active-flag toggle.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vigie_core::error::CoreError;
use vigie_core::severity::Severity;
use vigie_core::types::{RuleId, Timestamp};
use vigie_db::models::rule::{Rule, SetRuleActive};
use vigie_db::repositories::{AlertRepo, RuleRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Catalog listing row.
#[derive(Debug, Serialize)]
pub struct RuleItem {
    pub id: RuleId,
    pub name: String,
    pub description: Option<String>,
    pub rule_type: Option<String>,
    pub severity: Severity,
    pub severity_label: &'static str,
    pub is_active: bool,
    pub created_at: Timestamp,
    /// Open (`new` + `acknowledged`) alerts currently tied to this rule.
    pub open_alerts: i64,
}

fn rule_item(rule: Rule, open_alerts: i64) -> RuleItem {
    // Missing or unrecognized catalog severity displays as info.
    let severity = rule
        .severity
        .as_deref()
        .and_then(Severity::parse)
        .unwrap_or(Severity::Info);
    RuleItem {
        id: rule.id,
        name: rule.name,
        description: rule.description,
        rule_type: rule.rule_type,
        severity,
        severity_label: severity.label_fr(),
        is_active: rule.is_active,
        created_at: rule.created_at,
        open_alerts,
    }
}

/// GET /api/v1/rules
///
/// Catalog ordered by name, each rule with its open-alert count.
pub async fn list_rules(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rules = RuleRepo::list(&state.pool).await?;
    let counts: HashMap<RuleId, i64> = AlertRepo::count_open_by_rule(&state.pool)
        .await?
        .into_iter()
        .collect();

    let items: Vec<RuleItem> = rules
        .into_iter()
        .map(|rule| {
            let open = counts.get(&rule.id).copied().unwrap_or(0);
            rule_item(rule, open)
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// PATCH /api/v1/rules/{id}/active
///
/// Toggle a rule's active flag and invalidate the catalog cache so alert
/// projections pick the change up on the next request.
pub async fn set_rule_active(
    State(state): State<AppState>,
    Path(id): Path<RuleId>,
    Json(input): Json<SetRuleActive>,
) -> AppResult<impl IntoResponse> {
    let updated = RuleRepo::set_active(&state.pool, id, input.is_active)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "rule",
            id: id.to_string(),
        })?;

    state.rules.invalidate().await;
    tracing::info!(rule_id = %id, is_active = input.is_active, "Rule active flag changed");

    let open = AlertRepo::count_open_by_rule(&state.pool)
        .await?
        .into_iter()
        .find(|(rule_id, _)| *rule_id == id)
        .map(|(_, count)| count)
        .unwrap_or(0);

    Ok(Json(DataResponse {
        data: rule_item(updated, open),
    }))
}
