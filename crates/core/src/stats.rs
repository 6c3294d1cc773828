//! Dashboard aggregation: severity counts, per-rule and per-campaign
//! breakdowns, and the trend series with its period-over-period delta.
//!
//! All functions are single-pass over in-memory rows; nothing here is
//! persisted and every load recomputes from scratch (acceptable at the
//! documented volume of a few hundred alerts).

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::campaign;
use crate::severity::Severity;
use crate::types::{RuleId, Timestamp};

/// Chart color palette, assigned to rule buckets by first-seen order.
pub const PALETTE: [&str; 8] = [
    "#ef4444", "#f59e0b", "#3b82f6", "#8b5cf6", "#10b981", "#f97316", "#06b6d4", "#ec4899",
];

/// How many campaigns the by-campaign chart keeps.
const TOP_CAMPAIGNS: usize = 6;

// ---------------------------------------------------------------------------
// Severity counts
// ---------------------------------------------------------------------------

/// Open-alert counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}

impl SeverityCounts {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.critical + self.warning + self.info
    }
}

/// Count alerts by severity in one pass.
pub fn count_by_severity(severities: impl IntoIterator<Item = Severity>) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for s in severities {
        counts.add(s);
    }
    counts
}

// ---------------------------------------------------------------------------
// By-rule breakdown
// ---------------------------------------------------------------------------

/// One slice of the by-type chart.
#[derive(Debug, Clone, Serialize)]
pub struct RuleBucket {
    pub rule_id: RuleId,
    pub name: String,
    pub count: u64,
    pub color: &'static str,
}

/// Group open alerts by rule, labeling each bucket with the rule's display
/// name and a palette color indexed by first-seen order.
pub fn bucket_by_rule<'a>(
    alerts: impl IntoIterator<Item = (RuleId, &'a str)>,
) -> Vec<RuleBucket> {
    let mut buckets: Vec<RuleBucket> = Vec::new();
    for (rule_id, name) in alerts {
        match buckets.iter_mut().find(|b| b.rule_id == rule_id) {
            Some(bucket) => bucket.count += 1,
            None => {
                let color = PALETTE[buckets.len() % PALETTE.len()];
                buckets.push(RuleBucket {
                    rule_id,
                    name: name.to_string(),
                    count: 1,
                    color,
                });
            }
        }
    }
    buckets
}

// ---------------------------------------------------------------------------
// By-campaign breakdown
// ---------------------------------------------------------------------------

/// Per-campaign severity breakdown for the stacked bar chart.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignBucket {
    pub campaign_id: String,
    /// Abbreviated chart label (prefix stripped, length capped).
    pub label: String,
    pub counts: SeverityCounts,
}

/// Group open alerts by campaign, sorted by total descending and truncated
/// to the top six. Ties keep first-seen order (stable sort).
pub fn bucket_by_campaign<'a>(
    alerts: impl IntoIterator<Item = (&'a str, Severity)>,
) -> Vec<CampaignBucket> {
    let mut buckets: Vec<CampaignBucket> = Vec::new();
    for (campaign_id, severity) in alerts {
        let idx = match buckets.iter().position(|b| b.campaign_id == campaign_id) {
            Some(idx) => idx,
            None => {
                let name = campaign::campaign_name(campaign_id);
                buckets.push(CampaignBucket {
                    campaign_id: campaign_id.to_string(),
                    label: campaign::short_label(&name),
                    counts: SeverityCounts::default(),
                });
                buckets.len() - 1
            }
        };
        buckets[idx].counts.add(severity);
    }
    buckets.sort_by(|a, b| b.counts.total().cmp(&a.counts.total()));
    buckets.truncate(TOP_CAMPAIGNS);
    buckets
}

// ---------------------------------------------------------------------------
// Trend series
// ---------------------------------------------------------------------------

/// Selectable trend chart periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendPeriod {
    Days7,
    Days15,
    Days30,
    Days90,
}

impl TrendPeriod {
    /// Parse the API period keys (`7d`, `15d`, `1m`, `3m`).
    pub fn parse(key: &str) -> Option<TrendPeriod> {
        match key {
            "7d" => Some(TrendPeriod::Days7),
            "15d" => Some(TrendPeriod::Days15),
            "1m" => Some(TrendPeriod::Days30),
            "3m" => Some(TrendPeriod::Days90),
            _ => None,
        }
    }

    pub fn days(self) -> u64 {
        match self {
            TrendPeriod::Days7 => 7,
            TrendPeriod::Days15 => 15,
            TrendPeriod::Days30 => 30,
            TrendPeriod::Days90 => 90,
        }
    }
}

/// One time bucket of the trend chart, stacked by severity.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub bucket: String,
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}

/// Calendar bucket label for a date within a period.
///
/// Up to 7 days: French weekday abbreviations. Up to 31 days: `dd/mm`.
/// Beyond that: `Sem N` week-of-month labels.
fn bucket_label(date: NaiveDate, period_days: u64) -> String {
    if period_days <= 7 {
        let day = match date.weekday() {
            Weekday::Mon => "Lun",
            Weekday::Tue => "Mar",
            Weekday::Wed => "Mer",
            Weekday::Thu => "Jeu",
            Weekday::Fri => "Ven",
            Weekday::Sat => "Sam",
            Weekday::Sun => "Dim",
        };
        day.to_string()
    } else if period_days <= 31 {
        format!("{:02}/{:02}", date.day(), date.month())
    } else {
        format!("Sem {}", date.day().div_ceil(7))
    }
}

/// Build the zero-filled trend series for a period ending today.
///
/// Buckets are initialized for every day of the period (oldest first);
/// days sharing a label (week buckets) merge into one point. Events
/// outside the initialized window are ignored.
pub fn trend_series(
    events: &[(Timestamp, Severity)],
    period: TrendPeriod,
    now: Timestamp,
) -> Vec<TrendPoint> {
    let days = period.days();
    let today = now.date_naive();

    let mut points: Vec<TrendPoint> = Vec::new();
    for i in (0..days).rev() {
        let date = today - Days::new(i);
        let bucket = bucket_label(date, days);
        if !points.iter().any(|p| p.bucket == bucket) {
            points.push(TrendPoint {
                bucket,
                critical: 0,
                warning: 0,
                info: 0,
            });
        }
    }

    let earliest = today - Days::new(days - 1);
    for (detected_at, severity) in events {
        let date = detected_at.date_naive();
        // Labels recur across weeks, so out-of-window events must be
        // dropped by date before the label lookup.
        if date < earliest || date > today {
            continue;
        }
        let bucket = bucket_label(date, days);
        if let Some(point) = points.iter_mut().find(|p| p.bucket == bucket) {
            match severity {
                Severity::Critical => point.critical += 1,
                Severity::Warning => point.warning += 1,
                Severity::Info => point.info += 1,
            }
        }
    }

    points
}

/// Period-over-period percentage change.
///
/// `previous == 0` with a non-zero current period pins the trend at 100;
/// two empty periods are a flat 0.
pub fn trend_pct(previous: u64, current: u64) -> i64 {
    if previous > 0 {
        let delta = current as f64 - previous as f64;
        (delta / previous as f64 * 100.0).round() as i64
    } else if current > 0 {
        100
    } else {
        0
    }
}

/// Whole hours elapsed since a reference timestamp (floor).
pub fn hours_without_call(since: Timestamp, now: Timestamp) -> i64 {
    (now - since).num_hours()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn severity_counts_sum_to_total() {
        let counts = count_by_severity([
            Severity::Critical,
            Severity::Critical,
            Severity::Warning,
            Severity::Info,
        ]);
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.info, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn rule_buckets_keep_first_seen_colors() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let buckets = bucket_by_rule([(a, "Lead dormant"), (b, "Acharnement"), (a, "Lead dormant")]);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].color, PALETTE[0]);
        assert_eq!(buckets[1].color, PALETTE[1]);
    }

    #[test]
    fn campaign_buckets_sorted_and_truncated() {
        let mut alerts: Vec<(&str, Severity)> = Vec::new();
        // Seven campaigns; campaign "6046" gets the most alerts.
        for id in ["5612", "5927", "5920", "5622", "5611", "5621", "6046"] {
            alerts.push((id, Severity::Warning));
        }
        alerts.push(("6046", Severity::Critical));
        alerts.push(("6046", Severity::Info));

        let buckets = bucket_by_campaign(alerts);
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].campaign_id, "6046");
        assert_eq!(buckets[0].counts.total(), 3);
        assert_eq!(buckets[0].counts.critical, 1);
    }

    #[test]
    fn campaign_bucket_labels_are_abbreviated() {
        let buckets = bucket_by_campaign([("6046", Severity::Critical)]);
        // "CA - Métiers de Bouche" loses its prefix and fits the cap.
        assert_eq!(buckets[0].label, "Métiers de Bou…");
    }

    #[test]
    fn trend_pct_conventions() {
        assert_eq!(trend_pct(0, 0), 0);
        assert_eq!(trend_pct(0, 5), 100);
        assert_eq!(trend_pct(10, 15), 50);
        assert_eq!(trend_pct(10, 5), -50);
        assert_eq!(trend_pct(3, 4), 33);
    }

    #[test]
    fn period_keys_parse() {
        assert_eq!(TrendPeriod::parse("7d"), Some(TrendPeriod::Days7));
        assert_eq!(TrendPeriod::parse("1m"), Some(TrendPeriod::Days30));
        assert_eq!(TrendPeriod::parse("3m"), Some(TrendPeriod::Days90));
        assert_eq!(TrendPeriod::parse("2y"), None);
    }

    #[test]
    fn trend_series_zero_fills_and_counts() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
        let events = vec![
            (now - chrono::Duration::days(1), Severity::Critical),
            (now - chrono::Duration::days(1), Severity::Info),
            (now, Severity::Warning),
            // Outside the 7-day window: ignored.
            (now - chrono::Duration::days(10), Severity::Critical),
        ];

        let series = trend_series(&events, TrendPeriod::Days7, now);
        assert_eq!(series.len(), 7);
        // Last point is today (Thursday), previous is Wednesday.
        assert_eq!(series[6].bucket, "Jeu");
        assert_eq!(series[6].warning, 1);
        assert_eq!(series[5].bucket, "Mer");
        assert_eq!(series[5].critical, 1);
        assert_eq!(series[5].info, 1);
        let total: u64 = series.iter().map(|p| p.critical + p.warning + p.info).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn same_weekday_outside_window_is_excluded() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
        // Exactly one week back: same weekday label as today, but outside
        // the 7-day window.
        let events = vec![
            (now - chrono::Duration::days(7), Severity::Critical),
            (now + chrono::Duration::days(1), Severity::Warning),
        ];

        let series = trend_series(&events, TrendPeriod::Days7, now);
        assert_eq!(series[6].bucket, "Jeu");
        assert!(series.iter().all(|p| p.critical == 0 && p.warning == 0));
    }

    #[test]
    fn monthly_series_uses_day_labels() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
        let series = trend_series(&[], TrendPeriod::Days30, now);
        assert_eq!(series.len(), 30);
        assert_eq!(series[29].bucket, "27/08");
    }

    #[test]
    fn quarterly_series_merges_week_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
        let series = trend_series(&[], TrendPeriod::Days90, now);
        assert!(series.len() < 90);
        assert!(series.iter().all(|p| p.bucket.starts_with("Sem ")));
    }

    #[test]
    fn hours_without_call_floors() {
        let start = Utc.with_ymd_and_hms(2026, 8, 27, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 5, 59, 0).unwrap();
        assert_eq!(hours_without_call(start, now), 5);
    }
}
