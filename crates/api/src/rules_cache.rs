//! Process-wide rule catalog cache.
//!
//! Alert rows carry only a `rule_id`; display name and severity come from
//! the catalog. The catalog changes rarely (operators toggling rules), so
//! it is fetched once and kept until explicitly invalidated. Concurrent
//! cold-cache callers share a single fetch instead of racing to the
//! database.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use vigie_core::severity::Severity;
use vigie_core::types::RuleId;
use vigie_db::repositories::RuleRepo;
use vigie_db::DbPool;

/// Catalog projection of one rule.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub name: String,
    pub severity: Severity,
    pub description: String,
}

/// Immutable snapshot of the rule catalog at fetch time.
#[derive(Debug, Default)]
pub struct RulesSnapshot {
    rules: HashMap<RuleId, RuleInfo>,
}

impl RulesSnapshot {
    /// Look up a rule, falling back to an unknown-rule placeholder so a
    /// dangling `rule_id` never breaks a listing.
    pub fn info(&self, rule_id: RuleId) -> RuleInfo {
        self.rules.get(&rule_id).cloned().unwrap_or(RuleInfo {
            name: "Règle inconnue".to_string(),
            severity: Severity::Info,
            description: String::new(),
        })
    }
}

/// Cached catalog with explicit invalidation and in-flight deduplication.
#[derive(Debug, Default)]
pub struct RuleCatalog {
    snapshot: RwLock<Option<Arc<RulesSnapshot>>>,
    /// Serializes cold-cache fetches; concurrent callers queue here and
    /// find the snapshot populated when their turn comes.
    fetch_lock: Mutex<()>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot, fetching it from the database on a
    /// cold cache. Only one fetch runs at a time.
    pub async fn get_or_fetch(&self, pool: &DbPool) -> Result<Arc<RulesSnapshot>, sqlx::Error> {
        if let Some(snapshot) = self.snapshot.read().await.clone() {
            return Ok(snapshot);
        }

        let _guard = self.fetch_lock.lock().await;
        // Another caller may have completed the fetch while we waited.
        if let Some(snapshot) = self.snapshot.read().await.clone() {
            return Ok(snapshot);
        }

        let rules = RuleRepo::list(pool).await?;
        let snapshot = Arc::new(RulesSnapshot {
            rules: rules
                .into_iter()
                .map(|r| {
                    let severity = r
                        .severity
                        .as_deref()
                        .and_then(Severity::parse)
                        .unwrap_or(Severity::Info);
                    (
                        r.id,
                        RuleInfo {
                            name: r.name,
                            severity,
                            description: r.description.unwrap_or_default(),
                        },
                    )
                })
                .collect(),
        });

        *self.snapshot.write().await = Some(Arc::clone(&snapshot));
        tracing::debug!(rules = snapshot.rules.len(), "Rule catalog cached");
        Ok(snapshot)
    }

    /// Drop the cached snapshot. The next `get_or_fetch` hits the database.
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }
}
