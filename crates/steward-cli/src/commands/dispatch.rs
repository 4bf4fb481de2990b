use steward_config::StewardConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: Commands,
    config: &StewardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Summary(args) => commands::summary::handle(&args, config, flags),
        Commands::Gates(args) => commands::gates::handle(&args, config, flags),
        Commands::Status(args) => commands::status::handle(&args, config, flags),
        Commands::Advance(args) => commands::advance::handle_advance(&args, config, flags),
        Commands::Back(args) => commands::advance::handle_back(&args, config, flags),
        Commands::Apply(args) => commands::apply::handle(&args, config, flags),
        Commands::Lineage(args) => commands::lineage::handle(&args, config, flags),
        Commands::Impact(args) => commands::impact::handle(&args, config, flags),
        Commands::ValidateResolution(args) => {
            commands::validate_resolution::handle(&args, config, flags)
        }
        Commands::Schema => commands::schema::handle(flags),
    }
}
