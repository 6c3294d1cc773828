//! Handlers for the dashboard aggregates: severity stats, by-rule and
//! by-campaign breakdowns, and the detection trend.
//!
//! Nothing here is persisted; every request recomputes from the live
//! alert rows, keyed by the cached rule catalog for severity and names.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use vigie_core::severity::Severity;
use vigie_core::stats::{
    bucket_by_campaign, bucket_by_rule, count_by_severity, trend_pct, trend_series,
    CampaignBucket, RuleBucket, SeverityCounts, TrendPeriod, TrendPoint,
};
use vigie_db::models::sync_log::SyncLog;
use vigie_db::repositories::{AlertRepo, SyncLogRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /dashboard/stats
// ---------------------------------------------------------------------------

/// Headline stats card payload.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    #[serde(flatten)]
    pub counts: SeverityCounts,
    pub total: u64,
    pub resolved_last_24h: i64,
    /// Most recent engine run, if the engine has ever reported one.
    pub last_sync: Option<SyncLog>,
}

/// GET /api/v1/dashboard/stats
///
/// Open-alert counts per severity (catalog severity is authoritative),
/// plus the resolved-in-24h counter and the latest sync log.
pub async fn stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let open = AlertRepo::list_open(&state.pool).await?;
    let rules = state.rules.get_or_fetch(&state.pool).await?;

    let counts = count_by_severity(open.iter().map(|a| rules.info(a.rule_id).severity));
    let resolved_last_24h =
        AlertRepo::count_resolved_since(&state.pool, Utc::now() - Duration::hours(24)).await?;
    let last_sync = SyncLogRepo::latest(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            total: counts.total(),
            counts,
            resolved_last_24h,
            last_sync,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /dashboard/by-rule
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/by-rule
///
/// Open alerts grouped per rule, palette-colored by first-seen order.
pub async fn by_rule(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let open = AlertRepo::list_open(&state.pool).await?;
    let rules = state.rules.get_or_fetch(&state.pool).await?;

    let named: Vec<(vigie_core::types::RuleId, String)> = open
        .iter()
        .map(|a| (a.rule_id, rules.info(a.rule_id).name))
        .collect();
    let buckets: Vec<RuleBucket> =
        bucket_by_rule(named.iter().map(|(id, name)| (*id, name.as_str())));

    Ok(Json(DataResponse { data: buckets }))
}

// ---------------------------------------------------------------------------
// GET /dashboard/by-campaign
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/by-campaign
///
/// Top campaigns by open-alert volume with a nested severity breakdown.
/// Rows without a campaign are excluded from this chart.
pub async fn by_campaign(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let open = AlertRepo::list_open(&state.pool).await?;
    let rules = state.rules.get_or_fetch(&state.pool).await?;

    let keyed: Vec<(&str, Severity)> = open
        .iter()
        .filter_map(|a| {
            a.campaign
                .as_deref()
                .map(|c| (c, rules.info(a.rule_id).severity))
        })
        .collect();
    let buckets: Vec<CampaignBucket> = bucket_by_campaign(keyed);

    Ok(Json(DataResponse { data: buckets }))
}

// ---------------------------------------------------------------------------
// GET /dashboard/trend
// ---------------------------------------------------------------------------

/// Query params for `GET /dashboard/trend`.
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// `7d | 15d | 1m | 3m` (default `7d`).
    pub period: Option<String>,
}

/// Trend chart payload.
#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub period: String,
    pub points: Vec<TrendPoint>,
    pub current_total: usize,
    pub previous_total: i64,
    /// Period-over-period percentage change of detections.
    pub trend_pct: i64,
}

/// GET /api/v1/dashboard/trend?period=7d|15d|1m|3m
///
/// Detection counts bucketed over the period, stacked by severity, with
/// the change against the equal-length previous window.
pub async fn trend(
    State(state): State<AppState>,
    Query(params): Query<TrendQuery>,
) -> AppResult<impl IntoResponse> {
    let key = params.period.as_deref().unwrap_or("7d");
    let period = TrendPeriod::parse(key)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown trend period '{key}'")))?;

    let now = Utc::now();
    let window = Duration::days(period.days() as i64);
    let since = now - window;

    let events = AlertRepo::list_detected_since(&state.pool, since).await?;
    let rules = state.rules.get_or_fetch(&state.pool).await?;

    let severities: Vec<(vigie_core::types::Timestamp, Severity)> = events
        .iter()
        .map(|e| (e.detected_at, rules.info(e.rule_id).severity))
        .collect();
    let points = trend_series(&severities, period, now);

    let previous_total =
        AlertRepo::count_detected_between(&state.pool, since - window, since).await?;
    let pct = trend_pct(previous_total.max(0) as u64, events.len() as u64);

    Ok(Json(DataResponse {
        data: TrendResponse {
            period: key.to_string(),
            points,
            current_total: events.len(),
            previous_total,
            trend_pct: pct,
        },
    }))
}
