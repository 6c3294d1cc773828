//! Alert lifecycle states and the legal-transition state machine.
//!
//! The store persists `open | acknowledged | resolved | ignored`; the
//! display domain renames `open` to `new` and is otherwise identical.
//! Transitions are validated here and enforced by the repository layer,
//! which records one history row per transition.

use serde::{Deserialize, Serialize};

/// Display-domain lifecycle state of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
    Ignored,
}

/// Audit-trail action recorded for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Acknowledged,
    Resolved,
    Ignored,
    Reopened,
}

/// Map a raw stored status to its display form.
///
/// `open` becomes `new` and the legacy `dismissed` spelling becomes
/// `ignored`; every other value (including unrecognized ones) passes
/// through unchanged. Total, never errors.
pub fn map_status_raw(raw: &str) -> &str {
    match raw {
        "open" => "new",
        "dismissed" => "ignored",
        _ => raw,
    }
}

impl AlertStatus {
    /// Display form (`new`, `acknowledged`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::New => "new",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Ignored => "ignored",
        }
    }

    /// Raw stored form. The only divergence from the display form is
    /// `new`, persisted as `open`.
    pub fn as_raw(self) -> &'static str {
        match self {
            AlertStatus::New => "open",
            _ => self.as_str(),
        }
    }

    /// Parse either a raw or display status value. The legacy
    /// `dismissed` spelling is a synonym for `ignored`.
    pub fn parse(value: &str) -> Option<AlertStatus> {
        match value {
            "new" | "open" => Some(AlertStatus::New),
            "acknowledged" => Some(AlertStatus::Acknowledged),
            "resolved" => Some(AlertStatus::Resolved),
            "ignored" | "dismissed" => Some(AlertStatus::Ignored),
            _ => None,
        }
    }

    /// French display label.
    pub fn label_fr(self) -> &'static str {
        match self {
            AlertStatus::New => "Nouvelle",
            AlertStatus::Acknowledged => "En cours",
            AlertStatus::Resolved => "Résolue",
            AlertStatus::Ignored => "Ignorée",
        }
    }
}

impl HistoryAction {
    /// Parse a stored action value.
    pub fn parse(value: &str) -> Option<HistoryAction> {
        match value {
            "acknowledged" => Some(HistoryAction::Acknowledged),
            "resolved" => Some(HistoryAction::Resolved),
            "ignored" => Some(HistoryAction::Ignored),
            "reopened" => Some(HistoryAction::Reopened),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Acknowledged => "acknowledged",
            HistoryAction::Resolved => "resolved",
            HistoryAction::Ignored => "ignored",
            HistoryAction::Reopened => "reopened",
        }
    }

    /// French timeline label.
    pub fn label_fr(self) -> &'static str {
        match self {
            HistoryAction::Acknowledged => "Prise en charge",
            HistoryAction::Resolved => "Marquée résolue",
            HistoryAction::Ignored => "Ignorée",
            HistoryAction::Reopened => "Réouverte",
        }
    }
}

/// Return the audit action for a legal transition, or `None` when the
/// transition is not allowed.
///
/// Legal transitions:
///
/// ```text
/// new          -> acknowledged | ignored | resolved
/// acknowledged -> resolved | ignored
/// resolved     -> new   (reopen)
/// ignored      -> new   (reopen)
/// ```
///
/// `new -> resolved` is accepted because the list view resolves alerts in
/// bulk without acknowledging them first.
pub fn transition_action(from: AlertStatus, to: AlertStatus) -> Option<HistoryAction> {
    use AlertStatus::*;
    match (from, to) {
        (New, Acknowledged) => Some(HistoryAction::Acknowledged),
        (New, Ignored) => Some(HistoryAction::Ignored),
        (New, Resolved) => Some(HistoryAction::Resolved),
        (Acknowledged, Resolved) => Some(HistoryAction::Resolved),
        (Acknowledged, Ignored) => Some(HistoryAction::Ignored),
        (Resolved, New) => Some(HistoryAction::Reopened),
        (Ignored, New) => Some(HistoryAction::Reopened),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_maps_to_new() {
        assert_eq!(map_status_raw("open"), "new");
    }

    #[test]
    fn other_values_pass_through() {
        for v in ["acknowledged", "resolved", "ignored", "archived", "weird"] {
            assert_eq!(map_status_raw(v), v);
        }
    }

    #[test]
    fn dismissed_is_an_ignored_synonym() {
        assert_eq!(map_status_raw("dismissed"), "ignored");
        assert_eq!(AlertStatus::parse("dismissed"), Some(AlertStatus::Ignored));
    }

    #[test]
    fn new_is_stored_as_open() {
        assert_eq!(AlertStatus::New.as_raw(), "open");
        assert_eq!(AlertStatus::parse("open"), Some(AlertStatus::New));
        assert_eq!(AlertStatus::parse("new"), Some(AlertStatus::New));
    }

    #[test]
    fn legal_transitions_have_actions() {
        use AlertStatus::*;
        assert_eq!(
            transition_action(New, Acknowledged),
            Some(HistoryAction::Acknowledged)
        );
        assert_eq!(
            transition_action(Acknowledged, Resolved),
            Some(HistoryAction::Resolved)
        );
        assert_eq!(
            transition_action(Resolved, New),
            Some(HistoryAction::Reopened)
        );
        assert_eq!(
            transition_action(Ignored, New),
            Some(HistoryAction::Reopened)
        );
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        use AlertStatus::*;
        assert_eq!(transition_action(Resolved, Acknowledged), None);
        assert_eq!(transition_action(Ignored, Resolved), None);
        assert_eq!(transition_action(Resolved, Ignored), None);
        assert_eq!(transition_action(New, New), None);
    }
}
