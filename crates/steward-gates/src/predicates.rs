//! Per-entity predicates.
//!
//! Missing optional data never raises: it simply makes the predicate false.

use steward_core::entities::{Cde, Issue, LineageNode, ReconciliationMatch};
use steward_core::enums::{IssueStatus, Severity};

/// The CDE has an owner. Name validity is enforced on assignment.
#[must_use]
pub const fn has_owner(cde: &Cde) -> bool {
    cde.owner.is_some()
}

/// A critical issue that is not yet verified, closed, or escalated.
#[must_use]
pub fn is_critical_unresolved(issue: &Issue) -> bool {
    issue.severity == Severity::Critical && !issue.status.is_settled()
}

#[must_use]
pub fn has_complete_lineage(cde: &Cde) -> bool {
    cde.lineage_info
        .as_ref()
        .is_some_and(|info| info.has_complete_lineage)
}

/// The node has business terms, or has been explicitly deferred.
#[must_use]
pub fn is_linked_or_deferred(node: &LineageNode) -> bool {
    !node.business_terms.is_empty() || node.business_terms_deferred
}

/// No action has been taken on the match yet.
#[must_use]
pub const fn is_pending(m: &ReconciliationMatch) -> bool {
    m.action_taken.is_none()
}

/// Issue is being worked or awaiting verification.
#[must_use]
pub const fn is_in_resolution(issue: &Issue) -> bool {
    matches!(
        issue.status,
        IssueStatus::Resolving | IssueStatus::PendingVerification
    )
}
