//! Handlers for sync logs and the manual data-refresh trigger.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vigie_db::repositories::SyncLogRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum sync-log rows per request.
const LOGS_MAX_LIMIT: i64 = 200;
/// Default sync-log rows per request.
const LOGS_DEFAULT_LIMIT: i64 = 50;

/// Query params for `GET /sync-logs`.
#[derive(Debug, Deserialize)]
pub struct SyncLogQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/sync-logs
///
/// Recent rule-engine runs, newest first.
pub async fn list_sync_logs(
    State(state): State<AppState>,
    Query(params): Query<SyncLogQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params
        .limit
        .unwrap_or(LOGS_DEFAULT_LIMIT)
        .clamp(1, LOGS_MAX_LIMIT);
    let logs = SyncLogRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// Refresh trigger outcome.
#[derive(Debug, Serialize)]
pub struct RefreshResult {
    /// Whether an upstream webhook was actually called.
    pub triggered: bool,
}

/// POST /api/v1/refresh
///
/// Fire the configured refresh webhook once (GET, no retries) and require
/// a 2xx. Without a configured URL the endpoint acknowledges without
/// doing anything; displayed data is never altered by a failed refresh.
pub async fn trigger_refresh(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let Some(url) = state.config.refresh_webhook_url.as_deref() else {
        tracing::debug!("No refresh webhook configured, refresh is a no-op");
        return Ok(Json(DataResponse {
            data: RefreshResult { triggered: false },
        }));
    };

    let response = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Refresh webhook unreachable: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "Refresh webhook returned {}",
            response.status()
        )));
    }

    tracing::info!("Refresh webhook triggered");
    Ok(Json(DataResponse {
        data: RefreshResult { triggered: true },
    }))
}
