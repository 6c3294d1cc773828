//! Route definitions for sync logs and the manual refresh trigger.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::system;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET  /sync-logs    -> list_sync_logs (?limit=)
/// POST /refresh      -> trigger_refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync-logs", get(system::list_sync_logs))
        .route("/refresh", post(system::trigger_refresh))
}
