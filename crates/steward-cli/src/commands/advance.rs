use serde::Serialize;
use steward_config::StewardConfig;
use steward_core::progress::{Phase, Step};
use steward_gates::{GateError, WorkflowSession};

use crate::cli::GlobalFlags;
use crate::cli::commands::WriteArgs;
use crate::commands::shared::snapshot::{open_session, write_snapshot};
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct StepChange {
    pub from: Step,
    pub to: Step,
    pub phase: Phase,
    pub version: u64,
    pub written: bool,
}

/// Handle `stw advance`.
pub fn handle_advance(
    args: &WriteArgs,
    config: &StewardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = open_session(&args.file, config)?;
    let change = move_step(session, args, WorkflowSession::advance)?;
    output(&change, flags.format)
}

/// Handle `stw back`.
pub fn handle_back(
    args: &WriteArgs,
    config: &StewardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = open_session(&args.file, config)?;
    let change = move_step(session, args, WorkflowSession::back)?;
    output(&change, flags.format)
}

fn move_step(
    mut session: WorkflowSession,
    args: &WriteArgs,
    step: impl FnOnce(&mut WorkflowSession) -> Result<Step, GateError>,
) -> anyhow::Result<StepChange> {
    let from = session.step();
    let to = step(&mut session).map_err(with_blocking_ids)?;

    if args.write {
        write_snapshot(&args.file, session.snapshot())?;
    }

    Ok(StepChange {
        from,
        to,
        phase: to.phase(),
        version: session.version(),
        written: args.write,
    })
}

/// Spell out which entities hold a gate closed.
fn with_blocking_ids(error: GateError) -> anyhow::Error {
    match &error {
        GateError::Blocked { report, .. } => {
            let ids = report.blocking_ids.join(", ");
            anyhow::Error::new(error).context(format!("blocked by {ids}"))
        }
        _ => error.into(),
    }
}
