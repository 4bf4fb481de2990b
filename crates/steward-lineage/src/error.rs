//! Lineage graph error types.

/// Errors from building or querying a lineage graph.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LineageError {
    /// An edge references a node id that is not in the node set.
    #[error("edge {from} -> {to} references unknown node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    /// Two nodes share the same id.
    #[error("duplicate lineage node id '{0}'")]
    DuplicateNode(String),

    /// A query named a node that is not in the graph.
    #[error("unknown lineage node '{0}'")]
    UnknownNode(String),
}
