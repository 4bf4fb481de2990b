//! Impact preview for a change to a lineage node.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use steward_core::enums::{ImpactLevel, NodeType};

use crate::error::LineageError;
use crate::graph::LineageGraph;

/// More affected CDEs than this is always critical.
const CRITICAL_CDE_THRESHOLD: usize = 5;

/// More affected CDEs than this (without a report field) is medium.
const MEDIUM_CDE_THRESHOLD: usize = 2;

/// What a change to `source_id` would touch downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImpactPreview {
    pub source_id: String,
    pub affected_nodes: Vec<String>,
    pub affected_cdes: Vec<String>,
    /// Labels of affected `report_field` nodes.
    pub affected_reports: Vec<String>,
    pub estimated_impact_level: ImpactLevel,
}

/// Classify impact from the number of affected CDEs and report fields.
///
/// Precedence: more than five CDEs is `critical`; otherwise any report field
/// is `high`; otherwise more than two CDEs is `medium`; otherwise `low`.
#[must_use]
pub const fn classify_impact(affected_cdes: usize, affected_reports: usize) -> ImpactLevel {
    if affected_cdes > CRITICAL_CDE_THRESHOLD {
        ImpactLevel::Critical
    } else if affected_reports > 0 {
        ImpactLevel::High
    } else if affected_cdes > MEDIUM_CDE_THRESHOLD {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    }
}

impl LineageGraph {
    /// Preview the downstream impact of changing node `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownNode`] if `id` is not in the graph.
    pub fn impact_preview(&self, id: &str) -> Result<ImpactPreview, LineageError> {
        let downstream = self.downstream(id)?;

        let mut cdes = BTreeSet::new();
        let mut reports = BTreeSet::new();
        for node in downstream.iter().filter_map(|node_id| self.node(node_id)) {
            cdes.extend(node.related_cdes.iter().cloned());
            if node.node_type == NodeType::ReportField {
                reports.insert(node.label.clone());
            }
        }

        let level = classify_impact(cdes.len(), reports.len());
        tracing::debug!(
            node = id,
            affected = downstream.len(),
            cdes = cdes.len(),
            reports = reports.len(),
            %level,
            "impact preview"
        );

        Ok(ImpactPreview {
            source_id: id.to_string(),
            affected_nodes: downstream.into_iter().collect(),
            affected_cdes: cdes.into_iter().collect(),
            affected_reports: reports.into_iter().collect(),
            estimated_impact_level: level,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use steward_core::entities::LineageEdge;

    use super::*;
    use crate::graph::tests::node;

    #[rstest]
    #[case::nothing(0, 0, ImpactLevel::Low)]
    #[case::two_cdes(2, 0, ImpactLevel::Low)]
    #[case::three_cdes(3, 0, ImpactLevel::Medium)]
    #[case::five_cdes(5, 0, ImpactLevel::Medium)]
    #[case::report_alone(0, 1, ImpactLevel::High)]
    #[case::report_beats_medium(4, 2, ImpactLevel::High)]
    #[case::six_cdes_no_report(6, 0, ImpactLevel::Critical)]
    #[case::six_cdes_with_report(6, 3, ImpactLevel::Critical)]
    fn classification_precedence(
        #[case] cdes: usize,
        #[case] reports: usize,
        #[case] expected: ImpactLevel,
    ) {
        assert_eq!(classify_impact(cdes, reports), expected);
    }

    #[test]
    fn preview_unions_cdes_and_reports_downstream() {
        let graph = LineageGraph::new(
            vec![
                node("src", NodeType::SourceTable, &["cde-9"]),
                node("txf", NodeType::Transformation, &["cde-1", "cde-2"]),
                node("stg", NodeType::StagingTable, &["cde-2", "cde-3"]),
                node("rpt", NodeType::ReportField, &["cde-1"]),
                node("other", NodeType::ReportField, &["cde-7"]),
            ],
            &[
                LineageEdge::new("src", "txf"),
                LineageEdge::new("txf", "stg"),
                LineageEdge::new("stg", "rpt"),
            ],
        )
        .unwrap();

        let preview = graph.impact_preview("src").unwrap();
        assert_eq!(preview.affected_nodes, vec!["rpt", "stg", "txf"]);
        assert_eq!(preview.affected_cdes, vec!["cde-1", "cde-2", "cde-3"]);
        assert_eq!(preview.affected_reports, vec!["RPT"]);
        assert_eq!(preview.estimated_impact_level, ImpactLevel::High);
    }

    #[test]
    fn leaf_change_is_low_impact() {
        let graph =
            LineageGraph::new(vec![node("rpt", NodeType::ReportField, &["cde-1"])], &[]).unwrap();
        let preview = graph.impact_preview("rpt").unwrap();
        assert!(preview.affected_nodes.is_empty());
        assert_eq!(preview.estimated_impact_level, ImpactLevel::Low);
    }

    #[test]
    fn six_cdes_without_reports_is_critical() {
        let graph = LineageGraph::new(
            vec![
                node("src", NodeType::SourceTable, &[]),
                node(
                    "stg",
                    NodeType::StagingTable,
                    &["c1", "c2", "c3", "c4", "c5", "c6"],
                ),
            ],
            &[LineageEdge::new("src", "stg")],
        )
        .unwrap();
        assert_eq!(
            graph.impact_preview("src").unwrap().estimated_impact_level,
            ImpactLevel::Critical
        );
    }
}
