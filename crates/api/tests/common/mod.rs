//! Shared helpers for API integration tests: router construction that
//! mirrors production, request helpers, and seed data.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use vigie_api::config::ServerConfig;
use vigie_api::router::build_app_router;
use vigie_api::rules_cache::RuleCatalog;
use vigie_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults. No refresh webhook is
/// configured, so `POST /refresh` never leaves the process.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        refresh_webhook_url: None,
        default_actor: "dashboard".to_string(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rules: Arc::new(RuleCatalog::new()),
        http: reqwest::Client::new(),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert an error response carries the expected status and `code`.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_rule(pool: &PgPool, name: &str, severity: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO rules (name, description, severity) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(format!("Règle {name}"))
    .bind(severity)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Seed parameters for one alert row.
pub struct SeedAlert<'a> {
    pub rule_id: Uuid,
    pub status: &'a str,
    pub campaign: Option<&'a str>,
    pub lead_id: &'a str,
    pub agent_name: Option<&'a str>,
    pub detected_hours_ago: i64,
}

impl<'a> SeedAlert<'a> {
    pub fn new(rule_id: Uuid, status: &'a str) -> Self {
        Self {
            rule_id,
            status,
            campaign: Some("5612"),
            lead_id: "L-100",
            agent_name: Some("m.durand"),
            detected_hours_ago: 2,
        }
    }

    pub fn campaign(mut self, campaign: &'a str) -> Self {
        self.campaign = Some(campaign);
        self
    }

    pub fn lead(mut self, lead_id: &'a str) -> Self {
        self.lead_id = lead_id;
        self
    }

    pub fn agent(mut self, agent: Option<&'a str>) -> Self {
        self.agent_name = agent;
        self
    }

    pub fn hours_ago(mut self, hours: i64) -> Self {
        self.detected_hours_ago = hours;
        self
    }
}

pub async fn seed_alert(pool: &PgPool, seed: SeedAlert<'_>) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO alerts \
             (rule_id, status, detected_at, campaign, lead_id, agent_name, full_name) \
         VALUES ($1, $2, $3, $4, $5, $6, 'Jean Martin') \
         RETURNING id",
    )
    .bind(seed.rule_id)
    .bind(seed.status)
    .bind(Utc::now() - Duration::hours(seed.detected_hours_ago))
    .bind(seed.campaign)
    .bind(seed.lead_id)
    .bind(seed.agent_name)
    .fetch_one(pool)
    .await
    .unwrap()
}
