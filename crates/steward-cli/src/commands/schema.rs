use steward_core::snapshot::WorkflowSnapshot;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `stw schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(WorkflowSnapshot);
    output(&schema, flags.format)
}
