pub mod alerts;
pub mod dashboard;
pub mod health;
pub mod rules;
pub mod system;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /alerts                      list (filter/sort/paginate)
/// /alerts/{id}                 detail with audit timeline
/// /alerts/{id}/status          transition (POST)
/// /alerts/bulk-status          bulk transition (POST)
///
/// /rules                       catalog with open counts
/// /rules/{id}/active           toggle active flag (PATCH)
///
/// /dashboard/stats             severity counts + last sync
/// /dashboard/by-rule           per-rule buckets
/// /dashboard/by-campaign       top-6 campaign breakdown
/// /dashboard/trend             bucketed series (?period=)
///
/// /sync-logs                   recent engine runs (?limit=)
/// /refresh                     manual refresh trigger (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/alerts", alerts::router())
        .nest("/rules", rules::router())
        .nest("/dashboard", dashboard::router())
        .merge(system::router())
}
