use serde::Serialize;
use steward_config::StewardConfig;

use crate::cli::GlobalFlags;
use crate::cli::commands::IssueArgs;
use crate::commands::shared::snapshot::open_session;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ResolutionCheck {
    pub issue_id: String,
    pub passed: bool,
    pub problems: Vec<String>,
    pub min_description_chars: usize,
    pub min_evidence: usize,
}

/// Handle `stw validate-resolution`.
pub fn handle(args: &IssueArgs, config: &StewardConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = open_session(&args.file, config)?;
    let check = session.check_resolution(&args.issue)?;
    output(
        &ResolutionCheck {
            issue_id: args.issue.clone(),
            passed: check.passed,
            problems: check.problems,
            min_description_chars: config.resolution.min_description_chars,
            min_evidence: config.resolution.min_evidence,
        },
        flags.format,
    )
}
