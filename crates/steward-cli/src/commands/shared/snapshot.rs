//! Reading and writing the snapshot file a command operates on.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use steward_config::StewardConfig;
use steward_core::snapshot::WorkflowSnapshot;
use steward_gates::WorkflowSession;
use tempfile::NamedTempFile;

pub fn read_snapshot(path: &Path) -> anyhow::Result<WorkflowSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    WorkflowSnapshot::from_json(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Load the snapshot at `path` into a session using the configured rules.
pub fn open_session(path: &Path, config: &StewardConfig) -> anyhow::Result<WorkflowSession> {
    let snapshot = read_snapshot(path)?;
    WorkflowSession::new(snapshot, config.resolution)
        .with_context(|| format!("snapshot {} is not usable", path.display()))
}

/// Replace the file at `path` with `snapshot`.
///
/// Writes a sibling temp file and renames it over the target, so a failed
/// write never leaves a truncated snapshot behind.
pub fn write_snapshot(path: &Path, snapshot: &WorkflowSnapshot) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    file.write_all(snapshot.to_json_pretty()?.as_bytes())?;
    file.write_all(b"\n")?;
    file.persist(path)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;

    tracing::debug!(path = %path.display(), version = snapshot.version, "snapshot written");
    Ok(())
}
