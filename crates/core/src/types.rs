/// Alerts and rules are keyed by UUIDs assigned by the store.
pub type AlertId = uuid::Uuid;

/// Rule identifiers referenced from `alerts.rule_id`.
pub type RuleId = uuid::Uuid;

/// History rows use a plain BIGSERIAL key.
pub type HistoryId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
