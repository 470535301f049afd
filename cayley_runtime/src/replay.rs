//! Replay — rebuild a workbench from a config and a command script.
//!
//! Pure function of its inputs: the same config and script always give
//! the same fingerprint.

use std::fs;
use std::path::Path;

use crate::commands::{apply_sequence, Command};
use crate::config::WorkbenchConfig;
use crate::error::WorkbenchError;
use crate::workbench::Workbench;

/// Parse a JSON array of commands.
pub fn parse_script(json: &str) -> Result<Vec<Command>, WorkbenchError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &Path) -> Result<Vec<Command>, WorkbenchError> {
    parse_script(&fs::read_to_string(path)?)
}

/// 1. Fresh workbench from `config`
/// 2. Apply every command in order
/// 3. Return (workbench, fingerprint)
pub fn rebuild(
    config: &WorkbenchConfig,
    commands: &[Command],
) -> Result<(Workbench, String), WorkbenchError> {
    let mut workbench = Workbench::new(config.clone())?;
    apply_sequence(&mut workbench, commands)?;
    let fingerprint = workbench.fingerprint();
    Ok((workbench, fingerprint))
}

/// Rebuild and return only the fingerprint.
pub fn rebuild_fingerprint(
    config: &WorkbenchConfig,
    commands: &[Command],
) -> Result<String, WorkbenchError> {
    rebuild(config, commands).map(|(_, fingerprint)| fingerprint)
}

/// Replay twice and insist on identical fingerprints.
pub fn verify_determinism(
    config: &WorkbenchConfig,
    commands: &[Command],
) -> Result<String, WorkbenchError> {
    let first = rebuild_fingerprint(config, commands)?;
    let second = rebuild_fingerprint(config, commands)?;
    if first != second {
        panic!(
            "DETERMINISM FAILURE: two replays produced different fingerprints.\n\
             Run 1: {}\n\
             Run 2: {}",
            first, second
        );
    }
    Ok(first)
}
