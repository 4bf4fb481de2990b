use anyhow::Context;
use serde::Serialize;
use steward_config::StewardConfig;
use steward_gates::{Mutation, WorkflowSession};

use crate::cli::GlobalFlags;
use crate::cli::commands::ApplyArgs;
use crate::commands::shared::snapshot::{open_session, write_snapshot};
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct Applied {
    pub mutation: &'static str,
    pub version: u64,
    pub written: bool,
}

/// Handle `stw apply`.
pub fn handle(args: &ApplyArgs, config: &StewardConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut session = open_session(&args.file, config)?;
    let applied = apply(&mut session, &args.mutation)?;

    if args.write {
        write_snapshot(&args.file, session.snapshot())?;
    }

    output(
        &Applied {
            written: args.write,
            ..applied
        },
        flags.format,
    )
}

fn apply(session: &mut WorkflowSession, raw: &str) -> anyhow::Result<Applied> {
    let mutation: Mutation = serde_json::from_str(raw).context("invalid mutation JSON")?;
    let kind = mutation.kind();
    let version = session
        .apply(mutation)
        .with_context(|| format!("{kind} rejected"))?;
    Ok(Applied {
        mutation: kind,
        version,
        written: false,
    })
}
