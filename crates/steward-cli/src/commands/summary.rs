use steward_config::StewardConfig;

use crate::cli::GlobalFlags;
use crate::cli::commands::SnapshotArgs;
use crate::commands::shared::snapshot::open_session;
use crate::output::output;

/// Handle `stw summary`.
pub fn handle(
    args: &SnapshotArgs,
    config: &StewardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = open_session(&args.file, config)?;
    output(&session.dashboard(), flags.format)
}
