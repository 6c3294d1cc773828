//! Handlers for the `/alerts` resource: filtered listing, detail view,
//! and single/bulk status transitions.
//!
//! The listing works over a fetch window of the most recent rows and
//! applies facet filters, free-text search, sorting and pagination
//! in-memory, which is the canonical contract at the documented volume
//! of a few hundred live alerts.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use vigie_core::alert_data::{parse_alert_data, parse_call_history, AlertData, CallHistoryEntry};
use vigie_core::campaign;
use vigie_core::error::CoreError;
use vigie_core::filter::{AlertFilter, FilterTarget};
use vigie_core::severity::Severity;
use vigie_core::stats::hours_without_call;
use vigie_core::status::{map_status_raw, AlertStatus, HistoryAction};
use vigie_core::types::{AlertId, RuleId, Timestamp};
use vigie_db::models::alert::{Alert, BulkUpdateStatus, UpdateAlertStatus};
use vigie_db::repositories::{AlertHistoryRepo, AlertRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::rules_cache::RulesSnapshot;
use crate::state::AppState;

/// How many recent alerts the list view filters over.
const FETCH_WINDOW: i64 = 500;

/// Allowed page sizes; anything else is a 400.
const PAGE_SIZES: [usize; 5] = [10, 20, 30, 50, 100];
const DEFAULT_PAGE_SIZE: usize = 20;

// ---------------------------------------------------------------------------
// Query parameters and response types
// ---------------------------------------------------------------------------

/// Query params for `GET /alerts`.
#[derive(Debug, Default, Deserialize)]
pub struct AlertListQuery {
    /// Comma-separated severity facet (`critical,warning`).
    pub severity: Option<String>,
    /// Comma-separated status facet (display or raw form).
    pub status: Option<String>,
    /// Comma-separated rule-id facet.
    pub rule_id: Option<String>,
    /// Comma-separated campaign-id facet.
    pub campaign: Option<String>,
    /// Free-text filter across lead id, rule name, campaign name, agent.
    pub q: Option<String>,
    /// Sort key: `detected_at | severity | rule | campaign | lead`.
    pub sort: Option<String>,
    /// Sort order: `asc | desc` (default `desc`).
    pub order: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One row of the alert listing, projected for display.
#[derive(Debug, Serialize)]
pub struct AlertListItem {
    pub id: AlertId,
    pub rule_id: RuleId,
    pub rule_name: String,
    pub severity: Severity,
    pub severity_label: &'static str,
    /// Display-domain status (`new`, never `open`).
    pub status: String,
    pub status_label: String,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub lead_id: Option<String>,
    pub lead_name: Option<String>,
    pub agent_name: Option<String>,
    /// Last call qualification (closing code).
    pub qualification: Option<String>,
    pub tries_number: Option<i32>,
    pub call_duration: Option<i32>,
    pub detected_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Paged listing response.
#[derive(Debug, Serialize)]
pub struct AlertListPage {
    pub items: Vec<AlertListItem>,
    /// Total matching rows before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Rule projection embedded in the detail response.
#[derive(Debug, Serialize)]
pub struct RuleInfoBody {
    pub id: RuleId,
    pub name: String,
    pub severity: Severity,
    pub severity_label: &'static str,
    pub description: String,
}

/// One audit-timeline entry of the detail response.
#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub id: i64,
    pub action: String,
    pub action_label: String,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub performed_by: String,
    pub performed_at: Timestamp,
}

/// Full detail projection of one alert.
#[derive(Debug, Serialize)]
pub struct AlertDetail {
    pub id: AlertId,
    pub status: String,
    pub status_label: String,
    pub detected_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<String>,
    pub rule: RuleInfoBody,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub lead_id: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub agent_name: Option<String>,
    pub priority: Option<i32>,
    pub tries_number: Option<i32>,
    pub call_duration: Option<i32>,
    pub closing_code: Option<String>,
    pub state: Option<String>,
    pub excluded_detail: Option<String>,
    pub lead_source: Option<String>,
    pub system_id: Option<String>,
    pub created_at_lead: Option<Timestamp>,
    pub last_updated_at: Option<Timestamp>,
    pub last_call_time: Option<Timestamp>,
    pub retry_date: Option<Timestamp>,
    /// Parsed loose context bag (legacy spellings normalized).
    pub data: AlertData,
    pub call_history: Vec<CallHistoryEntry>,
    /// Whole hours since the lead was created (or the alert detected),
    /// derived on every load, never stored.
    pub hours_without_call: i64,
    /// Audit timeline, oldest first.
    pub history: Vec<HistoryItem>,
}

/// Outcome of a bulk transition; per-id results are independent, there
/// is no rollback across ids.
#[derive(Debug, Serialize)]
pub struct BulkStatusResult {
    pub attempted: usize,
    pub succeeded: Vec<AlertId>,
    pub failed: Vec<AlertId>,
}

// ---------------------------------------------------------------------------
// Projection helpers
// ---------------------------------------------------------------------------

fn status_label(raw: &str) -> String {
    match AlertStatus::parse(raw) {
        Some(status) => status.label_fr().to_string(),
        None => raw.to_string(),
    }
}

fn action_label(raw: &str) -> String {
    match HistoryAction::parse(raw) {
        Some(action) => action.label_fr().to_string(),
        None => raw.to_string(),
    }
}

fn list_item(alert: &Alert, rules: &RulesSnapshot) -> AlertListItem {
    let rule = rules.info(alert.rule_id);
    AlertListItem {
        id: alert.id,
        rule_id: alert.rule_id,
        rule_name: rule.name,
        severity: rule.severity,
        severity_label: rule.severity.label_fr(),
        status: map_status_raw(&alert.status).to_string(),
        status_label: status_label(&alert.status),
        campaign_id: alert.campaign.clone(),
        campaign_name: alert.campaign.as_deref().map(campaign::campaign_name),
        lead_id: alert.lead_id.clone(),
        lead_name: alert.full_name.clone(),
        agent_name: alert.agent_name.clone(),
        qualification: alert.closing_code.clone(),
        tries_number: alert.tries_number,
        call_duration: alert.call_duration,
        detected_at: alert.detected_at,
        resolved_at: alert.resolved_at,
    }
}

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

fn split_csv(value: Option<&str>) -> Vec<&str> {
    value
        .into_iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_filter(params: &AlertListQuery) -> AppResult<AlertFilter> {
    let mut filter = AlertFilter {
        text: params.q.clone().filter(|q| !q.trim().is_empty()),
        ..Default::default()
    };

    for raw in split_csv(params.severity.as_deref()) {
        let severity = Severity::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown severity '{raw}'")))?;
        filter.severities.push(severity);
    }
    for raw in split_csv(params.status.as_deref()) {
        let status = AlertStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{raw}'")))?;
        filter.statuses.push(status);
    }
    for raw in split_csv(params.rule_id.as_deref()) {
        let rule_id: RuleId = raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid rule id '{raw}'")))?;
        filter.rule_ids.push(rule_id);
    }
    filter.campaign_ids = split_csv(params.campaign.as_deref())
        .into_iter()
        .map(String::from)
        .collect();

    Ok(filter)
}

fn parse_page(params: &AlertListQuery) -> AppResult<(usize, usize)> {
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::BadRequest("page must be >= 1".into()));
    }
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !PAGE_SIZES.contains(&page_size) {
        return Err(AppError::BadRequest(format!(
            "page_size must be one of {PAGE_SIZES:?}"
        )));
    }
    Ok((page, page_size))
}

fn sort_items(items: &mut [AlertListItem], sort: &str, order: &str) -> AppResult<()> {
    let descending = match order {
        "desc" => true,
        "asc" => false,
        other => {
            return Err(AppError::BadRequest(format!(
                "order must be asc or desc, got '{other}'"
            )))
        }
    };

    match sort {
        "detected_at" => items.sort_by_key(|i| i.detected_at),
        "severity" => items.sort_by_key(|i| i.severity.rank()),
        "rule" => items.sort_by(|a, b| a.rule_name.cmp(&b.rule_name)),
        "campaign" => items.sort_by(|a, b| a.campaign_name.cmp(&b.campaign_name)),
        "lead" => items.sort_by(|a, b| a.lead_id.cmp(&b.lead_id)),
        other => {
            return Err(AppError::BadRequest(format!("Unknown sort key '{other}'")));
        }
    }
    if descending {
        items.reverse();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /alerts
// ---------------------------------------------------------------------------

/// GET /api/v1/alerts
///
/// Filter, sort and paginate the most recent alerts.
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = parse_filter(&params)?;
    let (page, page_size) = parse_page(&params)?;
    let sort = params.sort.as_deref().unwrap_or("detected_at");
    let order = params.order.as_deref().unwrap_or("desc");

    let alerts = AlertRepo::list_recent(&state.pool, FETCH_WINDOW).await?;
    let rules = state.rules.get_or_fetch(&state.pool).await?;

    let mut items: Vec<AlertListItem> = Vec::new();
    for alert in &alerts {
        let item = list_item(alert, &rules);
        let status = AlertStatus::parse(&alert.status);
        // Rows with a legacy status value can never match a status facet.
        if !filter.statuses.is_empty() && status.is_none() {
            continue;
        }
        let target = FilterTarget {
            severity: item.severity,
            status: status.unwrap_or(AlertStatus::New),
            rule_id: item.rule_id,
            campaign_id: item.campaign_id.as_deref().unwrap_or(""),
            lead_id: item.lead_id.as_deref().unwrap_or(""),
            rule_name: &item.rule_name,
            campaign_name: item.campaign_name.as_deref().unwrap_or(""),
            agent_name: item.agent_name.as_deref(),
        };
        if filter.matches(&target) {
            items.push(item);
        }
    }

    sort_items(&mut items, sort, order)?;

    let total = items.len();
    let total_pages = total.div_ceil(page_size);
    let items: Vec<AlertListItem> = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(Json(DataResponse {
        data: AlertListPage {
            items,
            total,
            page,
            page_size,
            total_pages,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /alerts/{id}
// ---------------------------------------------------------------------------

/// GET /api/v1/alerts/{id}
///
/// Full detail view: every known context field, the parsed data bag, the
/// rule projection, and the audit timeline.
pub async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<AlertId>,
) -> AppResult<impl IntoResponse> {
    let alert = AlertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "alert",
            id: id.to_string(),
        })?;

    let rules = state.rules.get_or_fetch(&state.pool).await?;
    let rule = rules.info(alert.rule_id);
    let history = AlertHistoryRepo::list_for_alert(&state.pool, id).await?;

    let since = alert.created_at_lead.unwrap_or(alert.detected_at);
    let detail = AlertDetail {
        id: alert.id,
        status: map_status_raw(&alert.status).to_string(),
        status_label: status_label(&alert.status),
        detected_at: alert.detected_at,
        resolved_at: alert.resolved_at,
        resolved_by: alert.resolved_by,
        rule: RuleInfoBody {
            id: alert.rule_id,
            name: rule.name,
            severity: rule.severity,
            severity_label: rule.severity.label_fr(),
            description: rule.description,
        },
        campaign_name: alert.campaign.as_deref().map(campaign::campaign_name),
        campaign_id: alert.campaign,
        lead_id: alert.lead_id,
        full_name: alert.full_name,
        first_name: alert.first_name,
        last_name: alert.last_name,
        phone: alert.phone,
        email: alert.email,
        agent_name: alert.agent_name,
        priority: alert.priority,
        tries_number: alert.tries_number,
        call_duration: alert.call_duration,
        closing_code: alert.closing_code,
        state: alert.state,
        excluded_detail: alert.excluded_detail,
        lead_source: alert.lead_source,
        system_id: alert.system_id,
        created_at_lead: alert.created_at_lead,
        last_updated_at: alert.last_updated_at,
        last_call_time: alert.last_call_time,
        retry_date: alert.retry_date,
        data: parse_alert_data(alert.alert_data.as_ref()),
        call_history: parse_call_history(alert.call_history.as_ref()),
        hours_without_call: hours_without_call(since, chrono::Utc::now()),
        history: history
            .into_iter()
            .map(|h| HistoryItem {
                id: h.id,
                action_label: action_label(&h.action),
                action: h.action,
                previous_status: h
                    .previous_status
                    .as_deref()
                    .map(|s| map_status_raw(s).to_string()),
                new_status: map_status_raw(&h.new_status).to_string(),
                performed_by: h.performed_by,
                performed_at: h.performed_at,
            })
            .collect(),
    };

    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// POST /alerts/{id}/status
// ---------------------------------------------------------------------------

/// POST /api/v1/alerts/{id}/status
///
/// Transition one alert. Illegal transitions are a 409.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<AlertId>,
    Json(input): Json<UpdateAlertStatus>,
) -> AppResult<impl IntoResponse> {
    let status = AlertStatus::parse(&input.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", input.status)))?;
    let actor = input
        .performed_by
        .as_deref()
        .unwrap_or(&state.config.default_actor);

    let updated = AlertRepo::transition(&state.pool, id, status, actor).await?;
    let rules = state.rules.get_or_fetch(&state.pool).await?;

    Ok(Json(DataResponse {
        data: list_item(&updated, &rules),
    }))
}

// ---------------------------------------------------------------------------
// POST /alerts/bulk-status
// ---------------------------------------------------------------------------

/// POST /api/v1/alerts/bulk-status
///
/// Fan out one independent transition per id and wait for all of them to
/// settle. A failed row never affects the others.
pub async fn bulk_update_status(
    State(state): State<AppState>,
    Json(input): Json<BulkUpdateStatus>,
) -> AppResult<impl IntoResponse> {
    let status = AlertStatus::parse(&input.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", input.status)))?;
    let actor = input
        .performed_by
        .clone()
        .unwrap_or_else(|| state.config.default_actor.clone());

    let updates = input.ids.iter().map(|&id| {
        let pool = state.pool.clone();
        let actor = actor.clone();
        async move { (id, AlertRepo::transition(&pool, id, status, &actor).await) }
    });
    let results = join_all(updates).await;

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (id, result) in results {
        match result {
            Ok(_) => succeeded.push(id),
            Err(err) => {
                tracing::warn!(alert_id = %id, error = %err, "Bulk transition failed for alert");
                failed.push(id);
            }
        }
    }

    Ok(Json(DataResponse {
        data: BulkStatusResult {
            attempted: input.ids.len(),
            succeeded,
            failed,
        },
    }))
}
