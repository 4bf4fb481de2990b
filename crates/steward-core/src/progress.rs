//! Wizard phases and steps, in the order a workflow cycle walks through them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A phase of the workflow wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    CdeIdentification,
    IssueManagement,
    LineageMapping,
    Complete,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CdeIdentification => "cde_identification",
            Self::IssueManagement => "issue_management",
            Self::LineageMapping => "lineage_mapping",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step of the wizard.
///
/// ```text
/// cde_identification: scoring_review → inventory_approval → ownership_assignment → reconciliation
/// issue_management:   triage → resolution → verification
/// lineage_mapping:    pipeline_scan → business_term_linking → impact_analysis → lineage_approval
/// complete
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ScoringReview,
    InventoryApproval,
    OwnershipAssignment,
    Reconciliation,
    Triage,
    Resolution,
    Verification,
    PipelineScan,
    BusinessTermLinking,
    ImpactAnalysis,
    LineageApproval,
    Complete,
}

impl Step {
    /// Every step in wizard order.
    pub const ORDER: [Self; 12] = [
        Self::ScoringReview,
        Self::InventoryApproval,
        Self::OwnershipAssignment,
        Self::Reconciliation,
        Self::Triage,
        Self::Resolution,
        Self::Verification,
        Self::PipelineScan,
        Self::BusinessTermLinking,
        Self::ImpactAnalysis,
        Self::LineageApproval,
        Self::Complete,
    ];

    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::ScoringReview
            | Self::InventoryApproval
            | Self::OwnershipAssignment
            | Self::Reconciliation => Phase::CdeIdentification,
            Self::Triage | Self::Resolution | Self::Verification => Phase::IssueManagement,
            Self::PipelineScan
            | Self::BusinessTermLinking
            | Self::ImpactAnalysis
            | Self::LineageApproval => Phase::LineageMapping,
            Self::Complete => Phase::Complete,
        }
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|step| *step == self)
            .unwrap_or(Self::ORDER.len() - 1)
    }

    /// The following step, or `None` once the cycle is complete.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ORDER.get(self.position() + 1).copied()
    }

    /// The preceding step, or `None` at the first step.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|idx| Self::ORDER.get(idx).copied())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScoringReview => "scoring_review",
            Self::InventoryApproval => "inventory_approval",
            Self::OwnershipAssignment => "ownership_assignment",
            Self::Reconciliation => "reconciliation",
            Self::Triage => "triage",
            Self::Resolution => "resolution",
            Self::Verification => "verification",
            Self::PipelineScan => "pipeline_scan",
            Self::BusinessTermLinking => "business_term_linking",
            Self::ImpactAnalysis => "impact_analysis",
            Self::LineageApproval => "lineage_approval",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a workflow cycle currently stands in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Progress {
    pub step: Step,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            step: Step::ScoringReview,
        }
    }
}

impl Progress {
    #[must_use]
    pub const fn phase(self) -> Phase {
        self.step.phase()
    }
}
