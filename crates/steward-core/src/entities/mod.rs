//! Entity structs for all Steward domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so workflow
//! snapshots can be exchanged as JSON and validated against a schema.

mod cde;
mod issue;
mod lineage;
mod reconciliation;

pub use cde::{Cde, LineageInfo, Owner};
pub use issue::{Evidence, Issue, Resolution, ResolutionRules};
pub use lineage::{LineageEdge, LineageNode};
pub use reconciliation::ReconciliationMatch;

/// Entities addressable by an opaque string id.
pub trait Identified {
    /// Entity kind used in error messages and logs.
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> &str;
}
