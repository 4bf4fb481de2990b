use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::enums::{CdeStatus, Criticality};

/// A critical data element under review in the current cycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Cde {
    pub id: String,
    pub name: String,
    pub status: CdeStatus,
    #[serde(default)]
    pub owner: Option<Owner>,
    /// AI-assigned score: 0 to 100.
    pub overall_score: u8,
    #[serde(default)]
    pub criticality: Option<Criticality>,
    #[serde(default)]
    pub lineage_info: Option<LineageInfo>,
    pub created_at: DateTime<Utc>,
}

impl Identified for Cde {
    const ENTITY_TYPE: &'static str = "cde";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Accountable data owner for a CDE.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Owner {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

/// Lineage coverage recorded against a CDE by the pipeline scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LineageInfo {
    pub has_complete_lineage: bool,
    #[serde(default)]
    pub source_systems: Vec<String>,
}
