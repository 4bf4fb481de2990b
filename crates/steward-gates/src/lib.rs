//! # steward-gates
//!
//! Business rules that decide whether a workflow cycle may move on.
//!
//! - [`predicates`]: per-entity checks that never fail
//! - [`aggregate`]: dashboard summaries over entity collections
//! - [`gates`]: allow/block decisions per wizard step
//! - [`workflow`]: the injected session that owns a cycle's state and
//!   advances it step by step
//!
//! Everything except [`workflow::WorkflowSession`] is a pure function over
//! borrowed collections and is recomputed on every call.

pub mod aggregate;
pub mod error;
pub mod gates;
pub mod predicates;
pub mod workflow;

pub use error::GateError;
pub use gates::{FormCheck, GateKind, GateReport};
pub use workflow::{Dashboard, Mutation, StepStatus, WorkflowSession};
