//! Row models and DTOs for the Vigie tables.

pub mod alert;
pub mod alert_history;
pub mod rule;
pub mod sync_log;
