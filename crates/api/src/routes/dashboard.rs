//! Route definitions for the dashboard aggregates.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats          -> stats
/// GET /by-rule        -> by_rule
/// GET /by-campaign    -> by_campaign
/// GET /trend          -> trend (?period=7d|15d|1m|3m)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/by-rule", get(dashboard::by_rule))
        .route("/by-campaign", get(dashboard::by_campaign))
        .route("/trend", get(dashboard::trend))
}
