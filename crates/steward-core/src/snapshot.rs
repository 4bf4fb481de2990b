//! Serialized state of one workflow cycle.
//!
//! This is the JSON document exchanged with the persistence layer and read by
//! the `stw` CLI.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Cde, Identified, Issue, LineageEdge, LineageNode, ReconciliationMatch};
use crate::errors::CoreError;
use crate::progress::Progress;

/// Full state of a workflow cycle at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub cycle_id: String,
    /// Incremented on every mutation; compared by the sync layer at write time.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub cdes: Vec<Cde>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub reconciliation: Vec<ReconciliationMatch>,
    #[serde(default)]
    pub lineage: LineageSnapshot,
}

/// Raw lineage nodes and edges as delivered by the pipeline scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LineageSnapshot {
    #[serde(default)]
    pub nodes: Vec<LineageNode>,
    #[serde(default)]
    pub edges: Vec<LineageEdge>,
}

impl WorkflowSnapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if the document is malformed.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Render the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject CDEs, issues, or reconciliation matches that share an id.
    ///
    /// Transitions address entities by id, so a repeated id would leave every
    /// copy after the first unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first repeated id.
    pub fn check_unique_ids(&self) -> Result<(), CoreError> {
        ensure_unique(&self.cdes)?;
        ensure_unique(&self.issues)?;
        ensure_unique(&self.reconciliation)
    }
}

fn ensure_unique<T: Identified>(items: &[T]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(items.len());
    match items.iter().find(|item| !seen.insert(item.id())) {
        Some(dup) => Err(CoreError::Validation(format!(
            "duplicate {} id '{}'",
            T::ENTITY_TYPE,
            dup.id()
        ))),
        None => Ok(()),
    }
}
