use anyhow::Context;
use serde::Serialize;
use steward_config::StewardConfig;
use steward_gates::WorkflowSession;
use steward_lineage::TraversalDirection;

use crate::cli::GlobalFlags;
use crate::cli::commands::LineageArgs;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::snapshot::open_session;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct Reachable {
    pub node: String,
    pub direction: TraversalDirection,
    pub nodes: Vec<String>,
}

/// Handle `stw lineage`.
pub fn handle(
    args: &LineageArgs,
    config: &StewardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let direction = parse_enum(&args.direction, "direction")?;
    let session = open_session(&args.file, config)?;
    output(&reachable(&session, &args.node, direction)?, flags.format)
}

fn reachable(
    session: &WorkflowSession,
    node: &str,
    direction: TraversalDirection,
) -> anyhow::Result<Reachable> {
    let nodes = session
        .lineage_graph()?
        .reachable(node, direction)
        .with_context(|| format!("cannot trace {direction} from '{node}'"))?;
    Ok(Reachable {
        node: node.to_string(),
        direction,
        nodes: nodes.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::shared::snapshot::tests::fixture_file;

    fn session() -> WorkflowSession {
        let (_dir, path) = fixture_file();
        open_session(&path, &StewardConfig::default()).unwrap()
    }

    #[test]
    fn downstream_of_counterparty_source() {
        let result = reachable(&session(), "src_cpty", TraversalDirection::Downstream).unwrap();
        assert_eq!(
            result.nodes,
            vec!["rpt_c07_ead", "rpt_c08_rw", "stg_exposure", "txf_ead"]
        );
    }

    #[test]
    fn upstream_of_source_is_empty() {
        let result = reachable(&session(), "src_loans", TraversalDirection::Upstream).unwrap();
        assert!(result.nodes.is_empty());
    }

    #[test]
    fn unknown_node_is_an_error() {
        let err = reachable(&session(), "rpt_c99", TraversalDirection::Upstream).unwrap_err();
        assert!(err.to_string().contains("cannot trace upstream from 'rpt_c99'"));
    }
}
