//! `<artifact>.provenance.json` sidecars for CLI outputs.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }
}

/// Which engine build produced an artifact.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Revision {
    pub engine_version: &'static str,
    /// Commit from `PAGETURN_REV` or `GIT_COMMIT` (build or run time), else
    /// `git describe`, else `"unknown"`.
    pub code_rev: String,
}

impl Revision {
    pub fn current() -> Self {
        Self {
            engine_version: pageturn::VERSION,
            code_rev: lookup_rev(),
        }
    }
}

fn lookup_rev() -> String {
    let baked = [option_env!("PAGETURN_REV"), option_env!("GIT_COMMIT")];
    let runtime = ["PAGETURN_REV", "GIT_COMMIT"].map(|k| std::env::var(k).ok());
    baked
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .chain(runtime.into_iter().flatten())
        .find(|rev| !rev.trim().is_empty())
        .or_else(git_describe)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_owned())
}

/// Write the sidecar next to `artifact` with the revision, callsite, command, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = sidecar_path(artifact);
    ensure_parent(&sidecar)?;

    let callsite = Location::caller();
    let doc = json!({
        "revision": Revision::current(),
        "callsite": format!("{}:{}", callsite.file(), callsite.line()),
        "command": payload.command,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    tracing::debug!(path = %sidecar.display(), "wrote provenance");
    Ok(sidecar)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display())),
        _ => Ok(()),
    }
}

/// `runs/turn.json` → `runs/turn.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}
