//! Route definitions for the `/rules` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::rules;
use crate::state::AppState;

/// Routes mounted at `/rules`.
///
/// ```text
/// GET    /               -> list_rules
/// PATCH  /{id}/active    -> set_rule_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rules::list_rules))
        .route("/{id}/active", patch(rules::set_rule_active))
}
