//! Workflow session error types.

use steward_core::errors::CoreError;
use steward_core::progress::Step;
use steward_lineage::LineageError;

use crate::gates::GateReport;

/// Errors from driving a workflow session.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The current step's gate refused the advance.
    #[error("cannot leave {step}: {message}", message = .report.message)]
    Blocked { step: Step, report: Box<GateReport> },

    /// The cycle has already passed its final step.
    #[error("workflow cycle is already complete")]
    CycleComplete,

    /// There is no step before the first one.
    #[error("already at the first step")]
    AtFirstStep,

    /// An entity transition was rejected, or the snapshot repeats an id.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The lineage section of the snapshot is structurally invalid.
    #[error("invalid lineage graph: {0}")]
    Lineage(#[from] LineageError),
}
