//! Phase gates.
//!
//! A gate is a boolean decision over the current collections that permits or
//! blocks leaving a wizard step. Every gate is vacuously open over an empty
//! collection. `blocking_ids` and `message` exist for display; `passed` is
//! the decision.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use steward_core::entities::{
    Cde, Identified, Issue, LineageNode, ReconciliationMatch, Resolution, ResolutionRules,
};
use steward_core::enums::{CdeStatus, IssueStatus};
use steward_core::progress::Step;
use steward_core::snapshot::WorkflowSnapshot;

use crate::predicates::{
    has_complete_lineage, has_owner, is_critical_unresolved, is_in_resolution,
    is_linked_or_deferred, is_pending,
};

/// Collection gates guarding wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    InventoryReview,
    Ownership,
    ReconciliationComplete,
    TriageComplete,
    ResolutionComplete,
    BlockingIssues,
    LineageLinking,
    LineageApproval,
}

impl GateKind {
    /// Every gate, in the order the wizard meets them.
    pub const ALL: [Self; 8] = [
        Self::InventoryReview,
        Self::Ownership,
        Self::ReconciliationComplete,
        Self::TriageComplete,
        Self::ResolutionComplete,
        Self::BlockingIssues,
        Self::LineageLinking,
        Self::LineageApproval,
    ];

    /// The gate that must pass before leaving `step`, if any.
    #[must_use]
    pub const fn guarding(step: Step) -> Option<Self> {
        match step {
            Step::InventoryApproval => Some(Self::InventoryReview),
            Step::OwnershipAssignment => Some(Self::Ownership),
            Step::Reconciliation => Some(Self::ReconciliationComplete),
            Step::Triage => Some(Self::TriageComplete),
            Step::Resolution => Some(Self::ResolutionComplete),
            Step::Verification => Some(Self::BlockingIssues),
            Step::BusinessTermLinking => Some(Self::LineageLinking),
            Step::LineageApproval => Some(Self::LineageApproval),
            Step::ScoringReview | Step::PipelineScan | Step::ImpactAnalysis | Step::Complete => {
                None
            }
        }
    }

    /// Evaluate this gate against a snapshot.
    #[must_use]
    pub fn evaluate(self, snapshot: &WorkflowSnapshot) -> GateReport {
        let report = match self {
            Self::InventoryReview => inventory_review_gate(&snapshot.cdes),
            Self::Ownership => ownership_gate(&snapshot.cdes),
            Self::ReconciliationComplete => reconciliation_gate(&snapshot.reconciliation),
            Self::TriageComplete => triage_gate(&snapshot.issues),
            Self::ResolutionComplete => resolution_complete_gate(resolution_scope(&snapshot.issues)),
            Self::BlockingIssues => blocking_issue_gate(&snapshot.issues),
            Self::LineageLinking => lineage_linking_gate(&snapshot.lineage.nodes),
            Self::LineageApproval => lineage_approval_gate(&snapshot.cdes),
        };
        tracing::debug!(
            gate = %self,
            passed = report.passed,
            blocking = report.blocking_ids.len(),
            "gate evaluated"
        );
        report
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InventoryReview => "inventory_review",
            Self::Ownership => "ownership",
            Self::ReconciliationComplete => "reconciliation_complete",
            Self::TriageComplete => "triage_complete",
            Self::ResolutionComplete => "resolution_complete",
            Self::BlockingIssues => "blocking_issues",
            Self::LineageLinking => "lineage_linking",
            Self::LineageApproval => "lineage_approval",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GateReport {
    pub gate: GateKind,
    pub passed: bool,
    /// Ids of the entities holding the gate closed.
    pub blocking_ids: Vec<String>,
    pub message: String,
}

fn evaluate<'a, T>(
    gate: GateKind,
    items: impl IntoIterator<Item = &'a T>,
    blocks: impl Fn(&T) -> bool,
    describe: impl FnOnce(usize) -> String,
) -> GateReport
where
    T: Identified + 'a,
{
    let blocking_ids: Vec<String> = items
        .into_iter()
        .filter(|item| blocks(*item))
        .map(|item| item.id().to_string())
        .collect();
    let passed = blocking_ids.is_empty();
    let message = if passed {
        "ready to continue".to_string()
    } else {
        describe(blocking_ids.len())
    };
    GateReport {
        gate,
        passed,
        blocking_ids,
        message,
    }
}

/// No CDE is left awaiting an approve/reject decision.
#[must_use]
pub fn inventory_review_gate(cdes: &[Cde]) -> GateReport {
    evaluate(
        GateKind::InventoryReview,
        cdes,
        |cde| cde.status == CdeStatus::Pending,
        |n| format!("{n} CDE(s) still pending review"),
    )
}

/// Every CDE has an accountable owner.
#[must_use]
pub fn ownership_gate(cdes: &[Cde]) -> GateReport {
    evaluate(
        GateKind::Ownership,
        cdes,
        |cde| !has_owner(cde),
        |n| format!("{n} CDE(s) still need an owner"),
    )
}

/// Every reconciliation match has an action recorded.
#[must_use]
pub fn reconciliation_gate(matches: &[ReconciliationMatch]) -> GateReport {
    evaluate(
        GateKind::ReconciliationComplete,
        matches,
        is_pending,
        |n| format!("{n} reconciliation match(es) still need an action"),
    )
}

/// No issue is still `open`.
#[must_use]
pub fn triage_gate(issues: &[Issue]) -> GateReport {
    evaluate(
        GateKind::TriageComplete,
        issues,
        |issue| issue.status == IssueStatus::Open,
        |n| format!("{n} issue(s) still awaiting triage"),
    )
}

/// Issues the resolution step is responsible for.
pub fn resolution_scope(issues: &[Issue]) -> impl Iterator<Item = &Issue> {
    issues.iter().filter(|issue| is_in_resolution(issue))
}

/// Every in-scope issue has been submitted for verification.
///
/// Callers pass the scoped issues, see [`resolution_scope`].
#[must_use]
pub fn resolution_complete_gate<'a>(in_scope: impl IntoIterator<Item = &'a Issue>) -> GateReport {
    evaluate(
        GateKind::ResolutionComplete,
        in_scope,
        |issue| issue.status != IssueStatus::PendingVerification,
        |n| format!("{n} issue(s) still being resolved"),
    )
}

/// No critical issue remains unresolved.
#[must_use]
pub fn blocking_issue_gate(issues: &[Issue]) -> GateReport {
    evaluate(
        GateKind::BlockingIssues,
        issues,
        is_critical_unresolved,
        |n| format!("{n} critical issue(s) are blocking progression"),
    )
}

/// The blocking issues themselves, for display.
#[must_use]
pub fn blocking_issues(issues: &[Issue]) -> Vec<&Issue> {
    issues.iter().filter(|issue| is_critical_unresolved(issue)).collect()
}

/// Every lineage node has business terms or an explicit deferral.
#[must_use]
pub fn lineage_linking_gate(nodes: &[LineageNode]) -> GateReport {
    evaluate(
        GateKind::LineageLinking,
        nodes,
        |node| !is_linked_or_deferred(node),
        |n| format!("{n} lineage node(s) have no business terms and no deferral"),
    )
}

/// Every approved CDE has complete lineage.
#[must_use]
pub fn lineage_approval_gate(cdes: &[Cde]) -> GateReport {
    evaluate(
        GateKind::LineageApproval,
        cdes.iter().filter(|cde| cde.status == CdeStatus::Approved),
        |cde| !has_complete_lineage(cde),
        |n| format!("{n} approved CDE(s) lack complete lineage"),
    )
}

/// Result of the resolution form check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormCheck {
    pub passed: bool,
    pub problems: Vec<String>,
}

/// Field-level gate on a resolution submission.
#[must_use]
pub fn resolution_form_gate(resolution: &Resolution, rules: &ResolutionRules) -> FormCheck {
    let problems = rules.problems(resolution);
    FormCheck {
        passed: problems.is_empty(),
        problems,
    }
}
