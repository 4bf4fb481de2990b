//! Validated lineage graph with upstream/downstream reachability.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use rustworkx_core::petgraph::Direction;
use rustworkx_core::petgraph::algo::toposort;
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use steward_core::entities::{LineageEdge, LineageNode};
use steward_core::enums::NodeType;
use steward_core::snapshot::LineageSnapshot;

use crate::error::LineageError;

/// Which way to follow edges during a reachability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalDirection {
    /// Follow `source -> target`: everything fed by the node.
    Downstream,
    /// Follow `target -> source`: everything feeding the node.
    Upstream,
}

impl TraversalDirection {
    const fn petgraph(self) -> Direction {
        match self {
            Self::Downstream => Direction::Outgoing,
            Self::Upstream => Direction::Incoming,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Downstream => "downstream",
            Self::Upstream => "upstream",
        }
    }
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape summary of a lineage graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub source_tables: usize,
    pub report_fields: usize,
    pub has_cycles: bool,
}

/// Directed lineage graph whose edges are guaranteed to reference known nodes.
pub struct LineageGraph {
    graph: DiGraph<LineageNode, ()>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl LineageGraph {
    /// Build a graph, rejecting duplicate node ids and dangling edges.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::DuplicateNode`] or [`LineageError::DanglingEdge`].
    pub fn new(nodes: Vec<LineageNode>, edges: &[LineageEdge]) -> Result<Self, LineageError> {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut id_to_index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if id_to_index.contains_key(&node.id) {
                return Err(LineageError::DuplicateNode(node.id));
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            id_to_index.insert(id, idx);
        }

        for edge in edges {
            let lookup = |id: &str| {
                id_to_index
                    .get(id)
                    .copied()
                    .ok_or_else(|| LineageError::DanglingEdge {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        missing: id.to_string(),
                    })
            };
            let src = lookup(&edge.source)?;
            let dst = lookup(&edge.target)?;
            graph.add_edge(src, dst, ());
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "lineage graph built"
        );

        Ok(Self { graph, id_to_index })
    }

    /// Build a graph from the lineage section of a workflow snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`LineageGraph::new`].
    pub fn from_snapshot(lineage: &LineageSnapshot) -> Result<Self, LineageError> {
        Self::new(lineage.nodes.clone(), &lineage.edges)
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, LineageError> {
        self.id_to_index
            .get(id)
            .copied()
            .ok_or_else(|| LineageError::UnknownNode(id.to_string()))
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LineageNode> {
        self.id_to_index.get(id).map(|idx| &self.graph[*idx])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LineageNode> {
        self.graph.node_weights()
    }

    /// Nodes reachable from `id` by following edges in `direction`.
    ///
    /// Each node is enqueued at most once, so the walk is O(V+E) and
    /// terminates on cyclic graphs. The origin appears in the result only when
    /// a cycle leads back to it.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownNode`] if `id` is not in the graph.
    pub fn reachable(
        &self,
        id: &str,
        direction: TraversalDirection,
    ) -> Result<BTreeSet<String>, LineageError> {
        let start = self.index_of(id)?;
        let dir = direction.petgraph();

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, dir) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        tracing::debug!(node = id, %direction, reached = visited.len(), "lineage traversal");

        Ok(visited
            .into_iter()
            .map(|idx| self.graph[idx].id.clone())
            .collect())
    }

    /// Everything fed, directly or transitively, by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownNode`] if `id` is not in the graph.
    pub fn downstream(&self, id: &str) -> Result<BTreeSet<String>, LineageError> {
        self.reachable(id, TraversalDirection::Downstream)
    }

    /// Everything feeding, directly or transitively, into `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownNode`] if `id` is not in the graph.
    pub fn upstream(&self, id: &str) -> Result<BTreeSet<String>, LineageError> {
        self.reachable(id, TraversalDirection::Upstream)
    }

    /// Whether the graph has any cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        toposort(&self.graph, None).is_err()
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let count_type = |node_type: NodeType| {
            self.graph
                .node_weights()
                .filter(|node| node.node_type == node_type)
                .count()
        };
        GraphStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            source_tables: count_type(NodeType::SourceTable),
            report_fields: count_type(NodeType::ReportField),
            has_cycles: self.has_cycles(),
        }
    }
}
