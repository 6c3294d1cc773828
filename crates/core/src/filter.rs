//! Alert list filter composition.
//!
//! Facet filters (severity, status, rule, campaign) compose as a
//! conjunction; each facet is an `IN`-set that matches everything when
//! empty. The free-text filter is a case-insensitive substring OR across
//! lead id, rule name, campaign name, and agent name.

use crate::severity::Severity;
use crate::status::AlertStatus;
use crate::types::RuleId;

/// Active filter set for the alert list.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub severities: Vec<Severity>,
    pub statuses: Vec<AlertStatus>,
    pub rule_ids: Vec<RuleId>,
    pub campaign_ids: Vec<String>,
    pub text: Option<String>,
}

/// The fields of one alert row the filter is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct FilterTarget<'a> {
    pub severity: Severity,
    pub status: AlertStatus,
    pub rule_id: RuleId,
    pub campaign_id: &'a str,
    pub lead_id: &'a str,
    pub rule_name: &'a str,
    pub campaign_name: &'a str,
    pub agent_name: Option<&'a str>,
}

impl AlertFilter {
    /// True when no facet and no text filter is active.
    pub fn is_empty(&self) -> bool {
        self.severities.is_empty()
            && self.statuses.is_empty()
            && self.rule_ids.is_empty()
            && self.campaign_ids.is_empty()
            && self.text.as_deref().is_none_or(str::is_empty)
    }

    /// Evaluate the full filter against one row.
    pub fn matches(&self, target: &FilterTarget<'_>) -> bool {
        if !self.severities.is_empty() && !self.severities.contains(&target.severity) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&target.status) {
            return false;
        }
        if !self.rule_ids.is_empty() && !self.rule_ids.contains(&target.rule_id) {
            return false;
        }
        if !self.campaign_ids.is_empty()
            && !self
                .campaign_ids
                .iter()
                .any(|c| c == target.campaign_id)
        {
            return false;
        }
        match self.text.as_deref() {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                let hit = |hay: &str| hay.to_lowercase().contains(&needle);
                hit(target.lead_id)
                    || hit(target.rule_name)
                    || hit(target.campaign_name)
                    || target.agent_name.is_some_and(hit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn target(lead_id: &'static str) -> FilterTarget<'static> {
        FilterTarget {
            severity: Severity::Critical,
            status: AlertStatus::New,
            rule_id: Uuid::nil(),
            campaign_id: "5612",
            lead_id,
            rule_name: "Lead dormant",
            campaign_name: "Métiers Animaliers",
            agent_name: Some("m.durand"),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = AlertFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&target("45231")));
    }

    #[test]
    fn facets_compose_as_conjunction() {
        let filter = AlertFilter {
            severities: vec![Severity::Critical],
            statuses: vec![AlertStatus::New],
            ..Default::default()
        };
        assert!(filter.matches(&target("45231")));

        let filter = AlertFilter {
            severities: vec![Severity::Critical],
            statuses: vec![AlertStatus::Resolved],
            ..Default::default()
        };
        assert!(!filter.matches(&target("45231")));
    }

    #[test]
    fn text_matches_any_listed_field_case_insensitive() {
        for needle in ["45231", "dormant", "animaliers", "DURAND"] {
            let filter = AlertFilter {
                text: Some(needle.to_string()),
                ..Default::default()
            };
            assert!(filter.matches(&target("45231")), "needle {needle}");
        }

        let filter = AlertFilter {
            text: Some("nothing-here".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&target("45231")));
    }

    #[test]
    fn text_filter_works_with_empty_facets() {
        // Free-text alone must select the matching row regardless of the
        // facet filters being empty.
        let filter = AlertFilter {
            text: Some("45231".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&target("45231")));
        assert!(!filter.matches(&target("99999")));
    }

    #[test]
    fn text_and_facets_combine() {
        let filter = AlertFilter {
            campaign_ids: vec!["5612".to_string()],
            text: Some("dormant".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&target("45231")));

        let filter = AlertFilter {
            campaign_ids: vec!["0000".to_string()],
            text: Some("dormant".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&target("45231")));
    }
}
