//! # steward-lineage
//!
//! Data lineage graph for Steward.
//!
//! - [`LineageGraph`] validates nodes and edges and answers upstream/downstream
//!   reachability queries with a cycle-safe breadth-first walk.
//! - [`ImpactPreview`] summarizes which CDEs and report fields a change to a
//!   node would touch, with an estimated [`ImpactLevel`](steward_core::enums::ImpactLevel).

mod error;
mod graph;
mod impact;

pub use error::LineageError;
pub use graph::{GraphStats, LineageGraph, TraversalDirection};
pub use impact::{ImpactPreview, classify_impact};
