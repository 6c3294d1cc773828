//! Repository for the `rules` table.

use sqlx::PgPool;
use vigie_core::types::RuleId;

use crate::models::rule::Rule;

const COLUMNS: &str =
    "id, name, description, rule_type, severity, is_active, conditions, created_at";

/// Read and toggle operations for the rule catalog.
pub struct RuleRepo;

impl RuleRepo {
    /// Fetch the full catalog, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Rule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules ORDER BY name ASC");
        sqlx::query_as::<_, Rule>(&query).fetch_all(pool).await
    }

    /// Fetch one rule by id.
    pub async fn find_by_id(pool: &PgPool, id: RuleId) -> Result<Option<Rule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules WHERE id = $1");
        sqlx::query_as::<_, Rule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set a rule's active flag. Returns the updated rule, or `None` if
    /// the rule does not exist.
    pub async fn set_active(
        pool: &PgPool,
        id: RuleId,
        is_active: bool,
    ) -> Result<Option<Rule>, sqlx::Error> {
        let query = format!(
            "UPDATE rules SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rule>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }
}
