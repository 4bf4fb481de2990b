use anyhow::Context;
use steward_config::StewardConfig;

use crate::cli::GlobalFlags;
use crate::cli::commands::NodeArgs;
use crate::commands::shared::snapshot::open_session;
use crate::output::output;

/// Handle `stw impact`.
pub fn handle(args: &NodeArgs, config: &StewardConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = open_session(&args.file, config)?;
    let preview = session
        .impact_preview(&args.node)
        .with_context(|| format!("cannot preview impact of '{}'", args.node))?;
    output(&preview, flags.format)
}
