//! Integration tests for the rule catalog, counts and sync logs.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use vigie_core::types::RuleId;
use vigie_db::repositories::{AlertRepo, RuleRepo, SyncLogRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_rule(pool: &PgPool, name: &str) -> RuleId {
    sqlx::query_scalar("INSERT INTO rules (name, severity) VALUES ($1, 'warning') RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_alert_at(
    pool: &PgPool,
    rule_id: RuleId,
    status: &str,
    detected_hours_ago: i64,
) {
    sqlx::query("INSERT INTO alerts (rule_id, status, detected_at) VALUES ($1, $2, $3)")
        .bind(rule_id)
        .bind(status)
        .bind(Utc::now() - Duration::hours(detected_hours_ago))
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: catalog listing is ordered by name
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_rules_ordered_by_name(pool: PgPool) {
    seed_rule(&pool, "Volume anormal").await;
    seed_rule(&pool, "Lead sans rappel").await;
    seed_rule(&pool, "Taux d'echec").await;

    let rules = RuleRepo::list(&pool).await.unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].name, "Lead sans rappel");
    assert_eq!(rules[1].name, "Taux d'echec");
    assert_eq!(rules[2].name, "Volume anormal");
}

// ---------------------------------------------------------------------------
// Test: toggling is_active
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_set_rule_active(pool: PgPool) {
    let rule_id = seed_rule(&pool, "Lead bloque").await;

    let updated = RuleRepo::set_active(&pool, rule_id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_active);

    let fetched = RuleRepo::find_by_id(&pool, rule_id).await.unwrap().unwrap();
    assert!(!fetched.is_active);

    let missing = RuleRepo::set_active(&pool, uuid::Uuid::new_v4(), true)
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: open counts group only open and acknowledged alerts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_count_open_by_rule(pool: PgPool) {
    let r1 = seed_rule(&pool, "R1").await;
    let r2 = seed_rule(&pool, "R2").await;

    seed_alert_at(&pool, r1, "open", 1).await;
    seed_alert_at(&pool, r1, "acknowledged", 2).await;
    seed_alert_at(&pool, r1, "resolved", 3).await;
    seed_alert_at(&pool, r2, "ignored", 1).await;

    let counts = AlertRepo::count_open_by_rule(&pool).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0], (r1, 2));
}

// ---------------------------------------------------------------------------
// Test: list window and detection-event queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_recent_window(pool: PgPool) {
    let rule_id = seed_rule(&pool, "Fenetre").await;
    for hours_ago in 1..=5 {
        seed_alert_at(&pool, rule_id, "open", hours_ago).await;
    }

    let alerts = AlertRepo::list_recent(&pool, 3).await.unwrap();
    assert_eq!(alerts.len(), 3);
    // Newest first.
    assert!(alerts[0].detected_at >= alerts[1].detected_at);
    assert!(alerts[1].detected_at >= alerts[2].detected_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_detected_since_and_between(pool: PgPool) {
    let rule_id = seed_rule(&pool, "Tendance").await;
    seed_alert_at(&pool, rule_id, "open", 1).await;
    seed_alert_at(&pool, rule_id, "open", 30).await;
    seed_alert_at(&pool, rule_id, "open", 100).await;

    let since = Utc::now() - Duration::hours(48);
    let events = AlertRepo::list_detected_since(&pool, since).await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0].detected_at <= events[1].detected_at);

    let count = AlertRepo::count_detected_between(
        &pool,
        Utc::now() - Duration::hours(120),
        since,
    )
    .await
    .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Test: sync logs, newest first, latest()
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_sync_logs(pool: PgPool) {
    sqlx::query(
        "INSERT INTO sync_logs (source, status, records_fetched, alerts_generated, duration_ms, created_at) \
         VALUES \
             ('diabolocom_api', 'success', 120, 4, 850, NOW() - INTERVAL '2 hours'), \
             ('mysql', 'error', 0, 0, 120, NOW() - INTERVAL '1 hour')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let logs = SyncLogRepo::list_recent(&pool, 50).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].source, "mysql");
    assert_eq!(logs[1].source, "diabolocom_api");

    let latest = SyncLogRepo::latest(&pool).await.unwrap().unwrap();
    assert_eq!(latest.status, "error");
}
