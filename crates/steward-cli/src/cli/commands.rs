use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Dashboard summaries and gate reports for a cycle.
    Summary(SnapshotArgs),
    /// Evaluate every phase gate.
    Gates(SnapshotArgs),
    /// Current phase and step, and whether its exit gate passes.
    Status(SnapshotArgs),
    /// Advance to the next step if the current gate passes.
    Advance(WriteArgs),
    /// Return to the previous step.
    Back(WriteArgs),
    /// Apply a mutation given as tagged JSON.
    Apply(ApplyArgs),
    /// Nodes reachable from a lineage node.
    Lineage(LineageArgs),
    /// Impact preview for changing a lineage node.
    Impact(NodeArgs),
    /// Check an issue's resolution against the form rules.
    ValidateResolution(IssueArgs),
    /// Print the JSON schema of the snapshot file format.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct SnapshotArgs {
    /// Workflow snapshot JSON file.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct WriteArgs {
    /// Workflow snapshot JSON file.
    pub file: PathBuf,

    /// Persist the updated snapshot back to the file.
    #[arg(long)]
    pub write: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ApplyArgs {
    /// Workflow snapshot JSON file.
    pub file: PathBuf,

    /// Mutation JSON, e.g. '{"type":"approve_all_pending"}'.
    pub mutation: String,

    /// Persist the updated snapshot back to the file.
    #[arg(long)]
    pub write: bool,
}

#[derive(Clone, Debug, Args)]
pub struct LineageArgs {
    /// Workflow snapshot JSON file.
    pub file: PathBuf,

    /// Lineage node id.
    pub node: String,

    /// Traversal direction: downstream or upstream.
    #[arg(short, long, default_value = "downstream")]
    pub direction: String,
}

#[derive(Clone, Debug, Args)]
pub struct NodeArgs {
    /// Workflow snapshot JSON file.
    pub file: PathBuf,

    /// Lineage node id.
    pub node: String,
}

#[derive(Clone, Debug, Args)]
pub struct IssueArgs {
    /// Workflow snapshot JSON file.
    pub file: PathBuf,

    /// Issue id.
    pub issue: String,
}
