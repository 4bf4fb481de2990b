use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::enums::NodeType;

/// A node in the data lineage graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LineageNode {
    pub id: String,
    pub label: String,
    pub node_type: NodeType,
    /// CDE ids carried through this node.
    #[serde(default)]
    pub related_cdes: Vec<String>,
    #[serde(default)]
    pub business_terms: Vec<String>,
    /// Excused from business-term linking for the current cycle.
    #[serde(default)]
    pub business_terms_deferred: bool,
    #[serde(default)]
    pub deferral_reason: Option<String>,
}

impl Identified for LineageNode {
    const ENTITY_TYPE: &'static str = "lineage_node";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Directed data flow from `source` to `target`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct LineageEdge {
    pub source: String,
    pub target: String,
}

impl LineageEdge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
