//! The loosely-typed per-rule alert payload.
//!
//! Each rule writes a different subset of fields into `alerts.alert_data`,
//! and older engine versions used different key spellings, so every field
//! is optional and the known spellings are accepted as aliases. Unknown
//! keys are preserved in `extra` rather than dropped. Malformed payloads
//! (including JSON double-encoded as a string) degrade to an empty bag,
//! never an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed alert context bag. Every field optional, by design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertData {
    pub priority: Option<i64>,
    #[serde(alias = "triesNumber", alias = "try_number", alias = "call_count")]
    pub tries_number: Option<i64>,
    #[serde(alias = "talkDuration", alias = "talk_duration")]
    pub call_duration: Option<i64>,
    #[serde(alias = "closingCode")]
    pub closing_code: Option<String>,
    #[serde(alias = "wrapupName", alias = "wrapup")]
    pub wrapup_name: Option<String>,
    #[serde(alias = "user_login1", alias = "user_login")]
    pub agent: Option<String>,
    #[serde(alias = "hoursWithoutCall")]
    pub hours_without_call: Option<i64>,
    /// Everything the known fields did not claim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One entry of the lead's call history. Shapes vary by engine version;
/// all fields are optional and unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallHistoryEntry {
    #[serde(alias = "callTime", alias = "date")]
    pub call_time: Option<String>,
    #[serde(alias = "user_login", alias = "user_login1")]
    pub agent: Option<String>,
    #[serde(alias = "talkDuration", alias = "talk_duration")]
    pub duration: Option<i64>,
    #[serde(alias = "wrapupName", alias = "wrapup")]
    pub wrapup_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Decode a stored value that may be a JSON object or a JSON-encoded
/// string (legacy rows). Anything unparseable yields the empty bag.
pub fn parse_alert_data(stored: Option<&Value>) -> AlertData {
    let Some(value) = stored else {
        return AlertData::default();
    };
    match value {
        Value::String(s) => serde_json::from_str(s).unwrap_or_default(),
        Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
        _ => AlertData::default(),
    }
}

/// Decode a stored `call_history` column (JSON array or JSON-encoded
/// string of one). Malformed input yields an empty list.
pub fn parse_call_history(stored: Option<&Value>) -> Vec<CallHistoryEntry> {
    let Some(value) = stored else {
        return Vec::new();
    };
    match value {
        Value::String(s) => serde_json::from_str(s).unwrap_or_default(),
        Value::Array(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
        _ => Vec::new(),
    }
}
