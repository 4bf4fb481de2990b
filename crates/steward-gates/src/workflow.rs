//! The workflow session: an explicit, caller-owned state container for one
//! cycle.
//!
//! The session owns the snapshot. Every mutation replaces the affected
//! collection with the output of a pure transition and bumps the version.
//! Gates and summaries are recomputed from the current snapshot on every
//! call; nothing derived is cached across mutations.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use steward_core::entities::{Owner, Resolution, ResolutionRules};
use steward_core::enums::{CdeStatus, IssueStatus, Priority, ReconciliationAction};
use steward_core::errors::CoreError;
use steward_core::progress::{Phase, Step};
use steward_core::snapshot::WorkflowSnapshot;
use steward_core::transitions;
use steward_lineage::{ImpactPreview, LineageGraph};

use crate::aggregate::{
    CdeSummary, IssueSummary, LineageSummary, ReconciliationSummary, summarize_cdes,
    summarize_issues, summarize_lineage, summarize_reconciliation,
};
use crate::error::GateError;
use crate::gates::{FormCheck, GateKind, GateReport, resolution_form_gate};

/// A user action against the cycle's entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mutation {
    AssignOwner {
        cde_id: String,
        owner: Owner,
    },
    SetCdeStatus {
        cde_id: String,
        status: CdeStatus,
    },
    ApproveAllPending,
    SetIssueStatus {
        issue_id: String,
        status: IssueStatus,
    },
    AssignIssue {
        issue_id: String,
        assignee: String,
    },
    SetPriority {
        issue_id: String,
        priority: Priority,
    },
    AcceptSuggestedPriority {
        issue_id: String,
    },
    SubmitResolution {
        issue_id: String,
        resolution: Resolution,
        /// Resolution timestamp; the current time when absent.
        #[serde(default)]
        at: Option<DateTime<Utc>>,
    },
    VerifyResolution {
        issue_id: String,
        accepted: bool,
    },
    RecordAction {
        current_id: String,
        action: ReconciliationAction,
    },
    AcceptSuggestedActions,
    LinkBusinessTerms {
        node_id: String,
        terms: Vec<String>,
    },
    DeferBusinessTerms {
        node_id: String,
        reason: String,
    },
}

impl Mutation {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AssignOwner { .. } => "assign_owner",
            Self::SetCdeStatus { .. } => "set_cde_status",
            Self::ApproveAllPending => "approve_all_pending",
            Self::SetIssueStatus { .. } => "set_issue_status",
            Self::AssignIssue { .. } => "assign_issue",
            Self::SetPriority { .. } => "set_priority",
            Self::AcceptSuggestedPriority { .. } => "accept_suggested_priority",
            Self::SubmitResolution { .. } => "submit_resolution",
            Self::VerifyResolution { .. } => "verify_resolution",
            Self::RecordAction { .. } => "record_action",
            Self::AcceptSuggestedActions => "accept_suggested_actions",
            Self::LinkBusinessTerms { .. } => "link_business_terms",
            Self::DeferBusinessTerms { .. } => "defer_business_terms",
        }
    }
}

/// Where the cycle stands and whether it may move on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StepStatus {
    pub cycle_id: String,
    pub version: u64,
    pub phase: Phase,
    pub step: Step,
    pub next_step: Option<Step>,
    /// Exit gate of the current step; `None` for ungated steps.
    pub gate: Option<GateReport>,
    pub can_advance: bool,
}

/// Everything the wizard dashboard shows for a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Dashboard {
    pub cycle_id: String,
    pub version: u64,
    pub phase: Phase,
    pub step: Step,
    pub cdes: CdeSummary,
    pub issues: IssueSummary,
    pub reconciliation: ReconciliationSummary,
    pub lineage: LineageSummary,
    pub gates: Vec<GateReport>,
}

/// State container for one workflow cycle.
#[derive(Debug, Clone)]
pub struct WorkflowSession {
    snapshot: WorkflowSnapshot,
    rules: ResolutionRules,
}

impl WorkflowSession {
    /// Wrap a snapshot, rejecting repeated entity ids or a malformed
    /// lineage graph.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Core`] when CDEs, issues, or reconciliation
    /// matches share an id, and [`GateError::Lineage`] for dangling edges or
    /// duplicate node ids.
    pub fn new(snapshot: WorkflowSnapshot, rules: ResolutionRules) -> Result<Self, GateError> {
        snapshot.check_unique_ids()?;
        LineageGraph::from_snapshot(&snapshot.lineage)?;
        Ok(Self { snapshot, rules })
    }

    #[must_use]
    pub const fn snapshot(&self) -> &WorkflowSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn into_snapshot(self) -> WorkflowSnapshot {
        self.snapshot
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.snapshot.version
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.snapshot.progress.step
    }

    /// Exit gate of the current step, evaluated now.
    #[must_use]
    pub fn exit_gate(&self) -> Option<GateReport> {
        GateKind::guarding(self.step()).map(|gate| gate.evaluate(&self.snapshot))
    }

    #[must_use]
    pub fn status(&self) -> StepStatus {
        let step = self.step();
        let gate = self.exit_gate();
        let next_step = step.next();
        StepStatus {
            cycle_id: self.snapshot.cycle_id.clone(),
            version: self.snapshot.version,
            phase: step.phase(),
            step,
            next_step,
            can_advance: next_step.is_some() && gate.as_ref().is_none_or(|g| g.passed),
            gate,
        }
    }

    /// Move to the next step if the current step's gate passes.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Blocked`] with the failing report, or
    /// [`GateError::CycleComplete`] at the final step.
    pub fn advance(&mut self) -> Result<Step, GateError> {
        let step = self.step();
        let next = step.next().ok_or(GateError::CycleComplete)?;

        if let Some(report) = self.exit_gate() {
            if !report.passed {
                tracing::warn!(
                    %step,
                    gate = %report.gate,
                    blocking = report.blocking_ids.len(),
                    "advance blocked"
                );
                return Err(GateError::Blocked {
                    step,
                    report: Box::new(report),
                });
            }
        }

        self.snapshot.progress.step = next;
        self.snapshot.version += 1;
        tracing::debug!(from = %step, to = %next, version = self.snapshot.version, "advanced");
        Ok(next)
    }

    /// Return to the previous step. Going back is never gated.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::AtFirstStep`] at the first step.
    pub fn back(&mut self) -> Result<Step, GateError> {
        let previous = self.step().previous().ok_or(GateError::AtFirstStep)?;
        self.snapshot.progress.step = previous;
        self.snapshot.version += 1;
        Ok(previous)
    }

    /// Apply a mutation and return the new version.
    ///
    /// On error the snapshot and version are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Core`] when the transition is rejected.
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, GateError> {
        let kind = mutation.kind();
        let s = &mut self.snapshot;

        match mutation {
            Mutation::AssignOwner { cde_id, owner } => {
                s.cdes = transitions::assign_owner(&s.cdes, &cde_id, owner)?;
            }
            Mutation::SetCdeStatus { cde_id, status } => {
                s.cdes = transitions::set_cde_status(&s.cdes, &cde_id, status)?;
            }
            Mutation::ApproveAllPending => {
                s.cdes = transitions::approve_all_pending(&s.cdes);
            }
            Mutation::SetIssueStatus { issue_id, status } => {
                s.issues = transitions::set_issue_status(&s.issues, &issue_id, status)?;
            }
            Mutation::AssignIssue { issue_id, assignee } => {
                s.issues = transitions::assign_issue(&s.issues, &issue_id, &assignee)?;
            }
            Mutation::SetPriority { issue_id, priority } => {
                s.issues = transitions::set_priority(&s.issues, &issue_id, priority)?;
            }
            Mutation::AcceptSuggestedPriority { issue_id } => {
                s.issues = transitions::accept_suggested_priority(&s.issues, &issue_id)?;
            }
            Mutation::SubmitResolution {
                issue_id,
                resolution,
                at,
            } => {
                s.issues = transitions::submit_resolution(
                    &s.issues,
                    &issue_id,
                    resolution,
                    &self.rules,
                    at.unwrap_or_else(Utc::now),
                )?;
            }
            Mutation::VerifyResolution { issue_id, accepted } => {
                s.issues = transitions::verify_resolution(&s.issues, &issue_id, accepted)?;
            }
            Mutation::RecordAction { current_id, action } => {
                s.reconciliation =
                    transitions::record_action(&s.reconciliation, &current_id, action)?;
            }
            Mutation::AcceptSuggestedActions => {
                s.reconciliation = transitions::accept_suggested_actions(&s.reconciliation);
            }
            Mutation::LinkBusinessTerms { node_id, terms } => {
                s.lineage.nodes =
                    transitions::link_business_terms(&s.lineage.nodes, &node_id, &terms)?;
            }
            Mutation::DeferBusinessTerms { node_id, reason } => {
                s.lineage.nodes =
                    transitions::defer_business_terms(&s.lineage.nodes, &node_id, &reason)?;
            }
        }

        s.version += 1;
        tracing::debug!(mutation = kind, version = s.version, "mutation applied");
        Ok(s.version)
    }

    /// Check the resolution attached to an issue against the form rules.
    ///
    /// An issue with no resolution fails every rule.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Core`] if the issue does not exist.
    pub fn check_resolution(&self, issue_id: &str) -> Result<FormCheck, GateError> {
        let issue = self
            .snapshot
            .issues
            .iter()
            .find(|issue| issue.id == issue_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "issue".to_string(),
                id: issue_id.to_string(),
            })?;
        let empty = Resolution::default();
        let resolution = issue.resolution.as_ref().unwrap_or(&empty);
        Ok(resolution_form_gate(resolution, &self.rules))
    }

    /// Every gate, evaluated against the current snapshot.
    #[must_use]
    pub fn gate_reports(&self) -> Vec<GateReport> {
        GateKind::ALL
            .into_iter()
            .map(|gate| gate.evaluate(&self.snapshot))
            .collect()
    }

    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        let s = &self.snapshot;
        Dashboard {
            cycle_id: s.cycle_id.clone(),
            version: s.version,
            phase: s.progress.phase(),
            step: s.progress.step,
            cdes: summarize_cdes(&s.cdes),
            issues: summarize_issues(&s.issues),
            reconciliation: summarize_reconciliation(&s.reconciliation),
            lineage: summarize_lineage(&s.lineage),
            gates: self.gate_reports(),
        }
    }

    /// Build the lineage graph for the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Lineage`] if the graph is malformed.
    pub fn lineage_graph(&self) -> Result<LineageGraph, GateError> {
        Ok(LineageGraph::from_snapshot(&self.snapshot.lineage)?)
    }

    /// Downstream impact of changing lineage node `node_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Lineage`] for an unknown node.
    pub fn impact_preview(&self, node_id: &str) -> Result<ImpactPreview, GateError> {
        Ok(self.lineage_graph()?.impact_preview(node_id)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use steward_core::entities::{Cde, LineageEdge, LineageNode};
    use steward_core::entities::{Issue, ReconciliationMatch};
    use steward_core::enums::{MatchType, NodeType, Severity};
    use steward_core::snapshot::LineageSnapshot;
    use steward_lineage::LineageError;

    use super::*;

    fn cde(id: &str, status: CdeStatus) -> Cde {
        Cde {
            id: id.to_string(),
            name: id.to_string(),
            status,
            owner: None,
            overall_score: 60,
            criticality: None,
            lineage_info: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn session_at(step: Step, cdes: Vec<Cde>) -> WorkflowSession {
        let mut snapshot = WorkflowSnapshot {
            cycle_id: "cycle".to_string(),
            cdes,
            ..WorkflowSnapshot::default()
        };
        snapshot.progress.step = step;
        WorkflowSession::new(snapshot, ResolutionRules::default()).unwrap()
    }

    #[test]
    fn ungated_step_advances_freely() {
        let mut session = session_at(Step::ScoringReview, Vec::new());
        assert_eq!(session.advance().unwrap(), Step::InventoryApproval);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn blocked_advance_keeps_step_and_version() {
        let mut session = session_at(
            Step::InventoryApproval,
            vec![cde("cde-1", CdeStatus::Pending)],
        );
        let err = session.advance().unwrap_err();

        match err {
            GateError::Blocked { step, report } => {
                assert_eq!(step, Step::InventoryApproval);
                assert_eq!(report.gate, GateKind::InventoryReview);
                assert_eq!(report.blocking_ids, vec!["cde-1"]);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        assert_eq!(session.step(), Step::InventoryApproval);
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn blocked_error_message_names_step() {
        let mut session = session_at(
            Step::OwnershipAssignment,
            vec![cde("cde-1", CdeStatus::Approved)],
        );
        assert_eq!(
            session.advance().unwrap_err().to_string(),
            "cannot leave ownership_assignment: 1 CDE(s) still need an owner"
        );
    }

    #[test]
    fn mutation_reopens_gate_immediately() {
        let mut session = session_at(
            Step::OwnershipAssignment,
            vec![cde("cde-1", CdeStatus::Approved)],
        );
        assert!(!session.status().can_advance);

        let version = session
            .apply(Mutation::AssignOwner {
                cde_id: "cde-1".to_string(),
                owner: Owner::new("Dana Reyes"),
            })
            .unwrap();
        assert_eq!(version, 1);
        assert!(session.status().can_advance);
        assert_eq!(session.advance().unwrap(), Step::Reconciliation);
    }

    #[test]
    fn failed_mutation_leaves_version() {
        let mut session = session_at(Step::ScoringReview, Vec::new());
        let err = session
            .apply(Mutation::SetCdeStatus {
                cde_id: "missing".to_string(),
                status: CdeStatus::Approved,
            })
            .unwrap_err();
        assert!(matches!(err, GateError::Core(CoreError::NotFound { .. })));
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn complete_cannot_advance_and_first_cannot_go_back() {
        let mut session = session_at(Step::Complete, Vec::new());
        assert!(matches!(session.advance(), Err(GateError::CycleComplete)));
        assert!(!session.status().can_advance);

        let mut session = session_at(Step::ScoringReview, Vec::new());
        assert!(matches!(session.back(), Err(GateError::AtFirstStep)));
    }

    #[test]
    fn back_is_ungated() {
        let mut session = session_at(Step::Reconciliation, vec![cde("cde-1", CdeStatus::Pending)]);
        assert_eq!(session.back().unwrap(), Step::OwnershipAssignment);
    }

    #[test]
    fn dangling_lineage_rejects_session() {
        let snapshot = WorkflowSnapshot {
            cycle_id: "cycle".to_string(),
            lineage: LineageSnapshot {
                nodes: vec![LineageNode {
                    id: "src".to_string(),
                    label: "SRC".to_string(),
                    node_type: NodeType::SourceTable,
                    related_cdes: Vec::new(),
                    business_terms: Vec::new(),
                    business_terms_deferred: false,
                    deferral_reason: None,
                }],
                edges: vec![LineageEdge::new("src", "gone")],
            },
            ..WorkflowSnapshot::default()
        };
        let err = WorkflowSession::new(snapshot, ResolutionRules::default()).unwrap_err();
        assert!(matches!(
            err,
            GateError::Lineage(LineageError::DanglingEdge { .. })
        ));
    }

    fn issue(id: &str) -> Issue {
        Issue {
            id: id.to_string(),
            title: "t".to_string(),
            severity: Severity::Low,
            status: IssueStatus::Open,
            priority: None,
            suggested_priority: None,
            assignee: None,
            cde_id: None,
            resolution: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            resolved_at: None,
        }
    }

    fn partial_match(current_id: &str) -> ReconciliationMatch {
        ReconciliationMatch {
            current_id: current_id.to_string(),
            external_id: None,
            match_type: MatchType::Partial,
            suggested_action: None,
            action_taken: None,
        }
    }

    #[test]
    fn repeated_entity_ids_reject_session() {
        let base = || WorkflowSnapshot {
            cycle_id: "cycle".to_string(),
            ..WorkflowSnapshot::default()
        };
        let cdes = WorkflowSnapshot {
            cdes: vec![cde("cde-1", CdeStatus::Pending), cde("cde-1", CdeStatus::Approved)],
            ..base()
        };
        let issues = WorkflowSnapshot {
            issues: vec![issue("iss-1"), issue("iss-1")],
            ..base()
        };
        let matches = WorkflowSnapshot {
            reconciliation: vec![partial_match("cde-002"), partial_match("cde-002")],
            ..base()
        };

        for (snapshot, expected) in [
            (cdes, "Validation error: duplicate cde id 'cde-1'"),
            (issues, "Validation error: duplicate issue id 'iss-1'"),
            (
                matches,
                "Validation error: duplicate reconciliation_match id 'cde-002'",
            ),
        ] {
            let err = WorkflowSession::new(snapshot, ResolutionRules::default()).unwrap_err();
            assert!(matches!(err, GateError::Core(CoreError::Validation(_))));
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn mutation_deserializes_from_tagged_json() {
        let mutation: Mutation = serde_json::from_str(
            r#"{"type":"assign_owner","cde_id":"cde-3","owner":{"name":"Lee Park"}}"#,
        )
        .unwrap();
        assert_eq!(
            mutation,
            Mutation::AssignOwner {
                cde_id: "cde-3".to_string(),
                owner: Owner::new("Lee Park"),
            }
        );
        assert_eq!(mutation.kind(), "assign_owner");
    }

    #[test]
    fn missing_resolution_fails_form_check() {
        let mut session = session_at(Step::Resolution, Vec::new());
        let mut pending = issue("iss-1");
        pending.status = IssueStatus::Resolving;
        session.snapshot.issues.push(pending);
        let check = session.check_resolution("iss-1").unwrap();
        assert!(!check.passed);
        assert_eq!(check.problems.len(), 3);
        assert!(session.check_resolution("iss-404").is_err());
    }
}
