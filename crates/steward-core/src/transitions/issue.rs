use chrono::{DateTime, Utc};

use super::{require_non_blank, update_by_id};
use crate::entities::{Identified, Issue, Resolution, ResolutionRules};
use crate::enums::{IssueStatus, Priority};
use crate::errors::CoreError;

fn transition(issue: &Issue, status: IssueStatus) -> Result<IssueStatus, CoreError> {
    if issue.status == status || issue.status.can_transition_to(status) {
        Ok(status)
    } else {
        Err(CoreError::invalid_transition(
            Issue::ENTITY_TYPE,
            &issue.id,
            issue.status,
            status,
        ))
    }
}

/// Move an issue to `status`. Setting the status it already has is a no-op.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] for an unknown id and
/// [`CoreError::InvalidTransition`] if the state machine forbids the move.
pub fn set_issue_status(
    issues: &[Issue],
    id: &str,
    status: IssueStatus,
) -> Result<Vec<Issue>, CoreError> {
    update_by_id(issues, id, |issue| {
        let status = transition(issue, status)?;
        Ok(Issue {
            status,
            ..issue.clone()
        })
    })
}

/// Assign an issue to a named resolver.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] for an unknown id and
/// [`CoreError::Validation`] if the assignee is blank.
pub fn assign_issue(issues: &[Issue], id: &str, assignee: &str) -> Result<Vec<Issue>, CoreError> {
    require_non_blank(assignee, "assignee")?;
    update_by_id(issues, id, |issue| {
        Ok(Issue {
            assignee: Some(assignee.trim().to_string()),
            ..issue.clone()
        })
    })
}

/// Set the working priority of an issue without touching its status.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] for an unknown id.
pub fn set_priority(issues: &[Issue], id: &str, priority: Priority) -> Result<Vec<Issue>, CoreError> {
    update_by_id(issues, id, |issue| {
        Ok(Issue {
            priority: Some(priority),
            ..issue.clone()
        })
    })
}

/// Adopt the suggested priority and mark the issue triaged in one step.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when the issue has no suggestion and
/// [`CoreError::InvalidTransition`] when it cannot be moved to `triaged`.
pub fn accept_suggested_priority(issues: &[Issue], id: &str) -> Result<Vec<Issue>, CoreError> {
    update_by_id(issues, id, |issue| {
        let suggested = issue.suggested_priority.ok_or_else(|| {
            CoreError::Validation(format!("issue {id} has no suggested priority"))
        })?;
        let status = transition(issue, IssueStatus::Triaged)?;
        Ok(Issue {
            priority: Some(suggested),
            status,
            ..issue.clone()
        })
    })
}

/// Attach a resolution and hand the issue over for verification.
///
/// The issue must be `resolving`. `resolved_at` is stamped with `now`.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] listing every rule the resolution breaks,
/// and [`CoreError::InvalidTransition`] if the issue is not being resolved.
pub fn submit_resolution(
    issues: &[Issue],
    id: &str,
    resolution: Resolution,
    rules: &ResolutionRules,
    now: DateTime<Utc>,
) -> Result<Vec<Issue>, CoreError> {
    let problems = rules.problems(&resolution);
    if !problems.is_empty() {
        return Err(CoreError::Validation(problems.join("; ")));
    }

    update_by_id(issues, id, |issue| {
        if issue.status != IssueStatus::Resolving {
            return Err(CoreError::invalid_transition(
                Issue::ENTITY_TYPE,
                id,
                issue.status,
                IssueStatus::PendingVerification,
            ));
        }
        Ok(Issue {
            status: IssueStatus::PendingVerification,
            resolution: Some(resolution),
            resolved_at: Some(now),
            ..issue.clone()
        })
    })
}

/// Record the verifier's decision on a submitted resolution.
///
/// Accepted resolutions move to `verified`; rejected ones go back to
/// `resolving` and lose their resolution timestamp.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] unless the issue is
/// `pending_verification`.
pub fn verify_resolution(issues: &[Issue], id: &str, accepted: bool) -> Result<Vec<Issue>, CoreError> {
    update_by_id(issues, id, |issue| {
        let target = if accepted {
            IssueStatus::Verified
        } else {
            IssueStatus::Resolving
        };
        if issue.status != IssueStatus::PendingVerification {
            return Err(CoreError::invalid_transition(
                Issue::ENTITY_TYPE,
                id,
                issue.status,
                target,
            ));
        }
        Ok(Issue {
            status: target,
            resolved_at: if accepted { issue.resolved_at } else { None },
            ..issue.clone()
        })
    })
}
