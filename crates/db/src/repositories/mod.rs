//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod alert_history_repo;
pub mod alert_repo;
pub mod rule_repo;
pub mod sync_log_repo;

pub use alert_history_repo::AlertHistoryRepo;
pub use alert_repo::{AlertRepo, TransitionError};
pub use rule_repo::RuleRepo;
pub use sync_log_repo::SyncLogRepo;
