//! Summary statistics over entity collections.
//!
//! All ratios round half-up to whole numbers and are 0 over an empty input.
//! Rounding is done in integer arithmetic so results are exact.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use steward_core::entities::{Cde, Issue, ReconciliationMatch};
use steward_core::enums::{CdeStatus, Criticality, IssueStatus, MatchType, NodeType, Severity};
use steward_core::snapshot::LineageSnapshot;

use crate::predicates::{
    has_complete_lineage, has_owner, is_critical_unresolved, is_linked_or_deferred, is_pending,
};

const SECONDS_PER_DAY: u64 = 86_400;

/// `numerator / denominator` rounded half-up; 0 when `denominator` is 0.
const fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}

fn to_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Mean `overall_score`, rounded half-up. 0 for an empty collection.
#[must_use]
pub fn average_score(cdes: &[Cde]) -> u32 {
    let total: u64 = cdes.iter().map(|cde| u64::from(cde.overall_score)).sum();
    to_u32(div_round_half_up(total, cdes.len() as u64))
}

/// Share of `items` satisfying `predicate`, as a whole percentage.
#[must_use]
pub fn coverage_percentage<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> u32 {
    let matching = items.iter().filter(|item| predicate(*item)).count() as u64;
    to_u32(div_round_half_up(matching * 100, items.len() as u64))
}

/// Mean days from creation to resolution over issues that have both stamps.
///
/// Issues resolved before they were created are ignored.
#[must_use]
pub fn avg_resolution_time_days(issues: &[Issue]) -> u32 {
    let spans: Vec<u64> = issues
        .iter()
        .filter_map(|issue| {
            let resolved_at = issue.resolved_at?;
            let seconds = (resolved_at - issue.created_at).num_seconds();
            u64::try_from(seconds).ok()
        })
        .collect();

    let total: u64 = spans.iter().sum();
    to_u32(div_round_half_up(
        total,
        spans.len() as u64 * SECONDS_PER_DAY,
    ))
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CdeSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub high_criticality: usize,
    pub owned: usize,
    pub average_score: u32,
    pub ownership_coverage: u32,
    pub lineage_coverage: u32,
}

#[must_use]
pub fn summarize_cdes(cdes: &[Cde]) -> CdeSummary {
    let count_status = |status: CdeStatus| cdes.iter().filter(|c| c.status == status).count();
    CdeSummary {
        total: cdes.len(),
        pending: count_status(CdeStatus::Pending),
        approved: count_status(CdeStatus::Approved),
        rejected: count_status(CdeStatus::Rejected),
        high_criticality: cdes
            .iter()
            .filter(|c| c.criticality == Some(Criticality::High))
            .count(),
        owned: cdes.iter().filter(|c| has_owner(c)).count(),
        average_score: average_score(cdes),
        ownership_coverage: coverage_percentage(cdes, has_owner),
        lineage_coverage: coverage_percentage(cdes, has_complete_lineage),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueSummary {
    pub total: usize,
    pub open: usize,
    pub triaged: usize,
    pub resolving: usize,
    pub pending_verification: usize,
    pub verified: usize,
    pub closed: usize,
    pub escalated: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub blocking: usize,
    pub avg_resolution_time_days: u32,
}

#[must_use]
pub fn summarize_issues(issues: &[Issue]) -> IssueSummary {
    let mut summary = IssueSummary {
        total: issues.len(),
        avg_resolution_time_days: avg_resolution_time_days(issues),
        ..IssueSummary::default()
    };

    for issue in issues {
        let bucket = match issue.status {
            IssueStatus::Open => &mut summary.open,
            IssueStatus::Triaged => &mut summary.triaged,
            IssueStatus::Resolving => &mut summary.resolving,
            IssueStatus::PendingVerification => &mut summary.pending_verification,
            IssueStatus::Verified => &mut summary.verified,
            IssueStatus::Closed => &mut summary.closed,
            IssueStatus::Escalated => &mut summary.escalated,
        };
        *bucket += 1;

        let bucket = match issue.severity {
            Severity::Critical => &mut summary.critical,
            Severity::High => &mut summary.high,
            Severity::Medium => &mut summary.medium,
            Severity::Low => &mut summary.low,
        };
        *bucket += 1;

        if is_critical_unresolved(issue) {
            summary.blocking += 1;
        }
    }

    summary
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReconciliationSummary {
    pub total: usize,
    pub exact: usize,
    pub partial: usize,
    pub new: usize,
    pub missing: usize,
    pub decided: usize,
    pub pending: usize,
    pub completion: u32,
}

#[must_use]
pub fn summarize_reconciliation(matches: &[ReconciliationMatch]) -> ReconciliationSummary {
    let count_type = |t: MatchType| matches.iter().filter(|m| m.match_type == t).count();
    let pending = matches.iter().filter(|m| is_pending(m)).count();
    ReconciliationSummary {
        total: matches.len(),
        exact: count_type(MatchType::Exact),
        partial: count_type(MatchType::Partial),
        new: count_type(MatchType::New),
        missing: count_type(MatchType::Missing),
        decided: matches.len() - pending,
        pending,
        completion: coverage_percentage(matches, |m| !is_pending(m)),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineageSummary {
    pub nodes: usize,
    pub edges: usize,
    pub source_tables: usize,
    pub transformations: usize,
    pub staging_tables: usize,
    pub report_fields: usize,
    pub linked: usize,
    pub deferred: usize,
    pub unlinked: usize,
    pub linking_coverage: u32,
}

#[must_use]
pub fn summarize_lineage(lineage: &LineageSnapshot) -> LineageSummary {
    let nodes = &lineage.nodes;
    let count_type = |t: NodeType| nodes.iter().filter(|n| n.node_type == t).count();
    let linked = nodes.iter().filter(|n| !n.business_terms.is_empty()).count();
    let deferred = nodes
        .iter()
        .filter(|n| n.business_terms.is_empty() && n.business_terms_deferred)
        .count();

    LineageSummary {
        nodes: nodes.len(),
        edges: lineage.edges.len(),
        source_tables: count_type(NodeType::SourceTable),
        transformations: count_type(NodeType::Transformation),
        staging_tables: count_type(NodeType::StagingTable),
        report_fields: count_type(NodeType::ReportField),
        linked,
        deferred,
        unlinked: nodes.len() - linked - deferred,
        linking_coverage: coverage_percentage(nodes, is_linked_or_deferred),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn scored(score: u8) -> Cde {
        Cde {
            id: format!("cde-{score}"),
            name: "c".to_string(),
            status: CdeStatus::Pending,
            owner: None,
            overall_score: score,
            criticality: None,
            lineage_info: None,
            created_at: Utc::now(),
        }
    }

    fn issue_resolved_after(hours: Option<i64>) -> Issue {
        let created_at = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        Issue {
            id: "iss".to_string(),
            title: "t".to_string(),
            severity: Severity::Medium,
            status: IssueStatus::Verified,
            priority: None,
            suggested_priority: None,
            assignee: None,
            cde_id: None,
            resolution: None,
            created_at,
            resolved_at: hours.map(|h| created_at + Duration::hours(h)),
        }
    }

    #[test]
    fn average_score_cases() {
        assert_eq!(average_score(&[]), 0);
        assert_eq!(average_score(&[scored(100)]), 100);
        assert_eq!(average_score(&[scored(80), scored(90)]), 85);
    }

    #[test]
    fn average_score_rounds_half_up() {
        assert_eq!(average_score(&[scored(80), scored(81)]), 81);
        assert_eq!(average_score(&[scored(0), scored(0), scored(1)]), 0);
        assert_eq!(average_score(&[scored(0), scored(1), scored(1)]), 1);
    }

    #[test]
    fn coverage_of_empty_is_zero() {
        assert_eq!(coverage_percentage::<Cde>(&[], |_| true), 0);
    }

    #[test]
    fn coverage_rounds_to_whole_percent() {
        let items = [1, 2, 3];
        assert_eq!(coverage_percentage(&items, |n| *n == 1), 33);
        assert_eq!(coverage_percentage(&items, |n| *n != 1), 67);
        assert_eq!(coverage_percentage(&[1, 2], |n| *n == 1), 50);
    }

    #[test]
    fn resolution_time_uses_only_resolved_issues() {
        let issues = vec![
            issue_resolved_after(Some(48)),
            issue_resolved_after(Some(96)),
            issue_resolved_after(None),
        ];
        assert_eq!(avg_resolution_time_days(&issues), 3);
    }

    #[test]
    fn resolution_time_rounds_and_skips_negative_spans() {
        assert_eq!(avg_resolution_time_days(&[issue_resolved_after(Some(36))]), 2);
        assert_eq!(avg_resolution_time_days(&[issue_resolved_after(Some(-24))]), 0);
        assert_eq!(avg_resolution_time_days(&[issue_resolved_after(None)]), 0);
        assert_eq!(avg_resolution_time_days(&[]), 0);
    }

    #[test]
    fn empty_summaries_are_zeroed() {
        assert_eq!(summarize_cdes(&[]), CdeSummary::default());
        assert_eq!(summarize_issues(&[]), IssueSummary::default());
        assert_eq!(summarize_reconciliation(&[]), ReconciliationSummary::default());
        assert_eq!(
            summarize_lineage(&LineageSnapshot::default()),
            LineageSummary::default()
        );
    }

    #[test]
    fn issue_summary_buckets() {
        let mut critical = issue_resolved_after(None);
        critical.severity = Severity::Critical;
        critical.status = IssueStatus::Open;
        let summary = summarize_issues(&[critical, issue_resolved_after(Some(24))]);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.open, 1);
        assert_eq!(summary.verified, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.blocking, 1);
        assert_eq!(summary.avg_resolution_time_days, 1);
    }
}
