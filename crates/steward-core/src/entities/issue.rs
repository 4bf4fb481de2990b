use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::enums::{IssueStatus, Priority, ResolutionType, Severity};

/// A data quality issue raised against the current cycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub status: IssueStatus,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Priority proposed by the assistant during triage.
    #[serde(default)]
    pub suggested_priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<String>,
    /// CDE the issue was raised against, if any.
    #[serde(default)]
    pub cde_id: Option<String>,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Identified for Issue {
    const ENTITY_TYPE: &'static str = "issue";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Resolution submitted for an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Resolution {
    #[serde(default)]
    pub resolution_type: Option<ResolutionType>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

/// A piece of supporting evidence attached to a resolution.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Evidence {
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

const fn default_min_description_chars() -> usize {
    50
}

const fn default_min_evidence() -> usize {
    1
}

/// Field-level requirements for a resolution submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolutionRules {
    /// Minimum characters in the trimmed description, counted as Unicode
    /// scalar values (an emoji counts once, not as a surrogate pair).
    #[serde(default = "default_min_description_chars")]
    pub min_description_chars: usize,

    /// Minimum number of evidence attachments.
    #[serde(default = "default_min_evidence")]
    pub min_evidence: usize,
}

impl Default for ResolutionRules {
    fn default() -> Self {
        Self {
            min_description_chars: default_min_description_chars(),
            min_evidence: default_min_evidence(),
        }
    }
}

impl ResolutionRules {
    /// Human-readable reasons the resolution does not meet these rules.
    ///
    /// An empty vector means the resolution is valid.
    #[must_use]
    pub fn problems(&self, resolution: &Resolution) -> Vec<String> {
        let mut problems = Vec::new();

        if resolution.resolution_type.is_none() {
            problems.push("resolution type is required".to_string());
        }

        let description_chars = resolution.description.trim().chars().count();
        if description_chars < self.min_description_chars {
            problems.push(format!(
                "description must be at least {} characters (got {description_chars})",
                self.min_description_chars
            ));
        }

        if resolution.evidence.len() < self.min_evidence {
            problems.push(format!(
                "at least {} evidence attachment(s) required (got {})",
                self.min_evidence,
                resolution.evidence.len()
            ));
        }

        problems
    }

    #[must_use]
    pub fn is_valid(&self, resolution: &Resolution) -> bool {
        self.problems(resolution).is_empty()
    }
}
