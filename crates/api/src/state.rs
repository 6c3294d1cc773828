use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rules_cache::RuleCatalog;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vigie_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cached rule catalog (name/severity lookup for alert projection).
    pub rules: Arc<RuleCatalog>,
    /// Outbound HTTP client for the manual-refresh webhook.
    pub http: reqwest::Client,
}
