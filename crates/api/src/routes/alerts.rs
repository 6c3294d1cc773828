//! Route definitions for the `/alerts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET    /               -> list_alerts
/// GET    /{id}           -> get_alert
/// POST   /{id}/status    -> update_status
/// POST   /bulk-status    -> bulk_update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list_alerts))
        .route("/bulk-status", post(alerts::bulk_update_status))
        .route("/{id}", get(alerts::get_alert))
        .route("/{id}/status", post(alerts::update_status))
}
