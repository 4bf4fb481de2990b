use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::enums::{MatchType, ReconciliationAction};

/// Correspondence between a current-cycle CDE and the external reference list.
///
/// A match without `action_taken` is pending.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReconciliationMatch {
    pub current_id: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub match_type: MatchType,
    #[serde(default)]
    pub suggested_action: Option<ReconciliationAction>,
    #[serde(default)]
    pub action_taken: Option<ReconciliationAction>,
}

impl Identified for ReconciliationMatch {
    const ENTITY_TYPE: &'static str = "reconciliation_match";

    fn id(&self) -> &str {
        &self.current_id
    }
}
