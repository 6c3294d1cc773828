//! Alert severity levels, ranked critical > warning > info.

use serde::{Deserialize, Serialize};

/// Severity of a detection rule (and of the alerts it produces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Sort rank: critical=0, warning=1, info=2. Stable total ordering,
    /// used for severity column sorts.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    /// Wire/storage form (`critical`, `warning`, `info`).
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// French display label, as rendered by the dashboard.
    pub fn label_fr(self) -> &'static str {
        match self {
            Severity::Critical => "Critique",
            Severity::Warning => "Attention",
            Severity::Info => "Info",
        }
    }

    /// Parse a stored severity value. Unknown or absent values are not an
    /// error at this level; callers fall back to [`Severity::Info`].
    pub fn parse(raw: &str) -> Option<Severity> {
        match raw {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_orders_critical_first() {
        assert!(Severity::Critical.rank() < Severity::Warning.rank());
        assert!(Severity::Warning.rank() < Severity::Info.rank());
    }

    #[test]
    fn parse_roundtrips_known_values() {
        for sev in [Severity::Critical, Severity::Warning, Severity::Info] {
            assert_eq!(Severity::parse(sev.as_str()), Some(sev));
        }
        assert_eq!(Severity::parse("blocker"), None);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
    }
}
