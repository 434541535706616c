// apply.rs — Compilation orchestrator: load → resolve → render → inject →
// write.
//
// Failure semantics: registry validation failure aborts the run before any
// file is touched. Per-artifact write failures are recorded in the outcome
// list and do not stop the remaining artifacts. Every new file content is
// fully assembled in memory before its write; the handle is scoped to the
// single write call and released on all paths.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use credo_model::{Artifact, ScopeChain};
use credo_registry::Registry;

use crate::error::CompileError;
use crate::inject::inject_region;
use crate::render::render_artifacts;
use crate::resolve::resolve;

/// Inputs to one compilation run.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Policy registry root (the directory holding `charter.yaml`).
    pub registry_root: PathBuf,

    /// Target repository root the artifacts are written into.
    pub target_repo: PathBuf,

    /// The precedence chain to resolve through.
    pub chain: ScopeChain,

    /// Override the confirmation gate for files with missing or malformed
    /// markers: append a fresh region without asking.
    pub force: bool,

    /// Compute outcomes without writing anything.
    pub dry_run: bool,
}

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// New content written (or would be, in a dry run).
    Written,
    /// Existing content already byte-identical; nothing to do.
    Unchanged,
    /// Existing file has missing or malformed markers; appending needs
    /// the caller's confirmation (or `force`). Nothing was written.
    NeedsConfirmation,
    /// The write failed; the rest of the run continued.
    Failed(String),
}

/// Per-artifact outcome, reported in rendering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    /// Path relative to the target repository.
    pub path: PathBuf,
    pub status: OutcomeStatus,
}

impl ArtifactOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Run one full compilation.
///
/// Returns `Err` only for fatal load/validation failures, in which case no
/// file has been touched. Otherwise returns one outcome per artifact;
/// partial failure is visible in the list, never silently swallowed.
pub fn apply(options: &ApplyOptions) -> Result<Vec<ArtifactOutcome>, CompileError> {
    let registry = Registry::new(&options.registry_root);
    let bundle = registry.load_for_chain(&options.chain)?;
    let context = resolve(&bundle.charter, &bundle.behaviors, &options.chain);
    let artifacts = render_artifacts(&context);

    tracing::info!(
        "compiling {} artifact(s) for scope '{}' into {}",
        artifacts.len(),
        options.chain.target(),
        options.target_repo.display()
    );

    let outcomes = artifacts
        .iter()
        .map(|artifact| write_artifact(&options.target_repo, artifact, options))
        .collect();
    Ok(outcomes)
}

fn write_artifact(repo: &Path, artifact: &Artifact, options: &ApplyOptions) -> ArtifactOutcome {
    let status = match try_write(repo, artifact, options) {
        Ok(status) => status,
        Err(source) => {
            tracing::warn!("failed to write {}: {}", artifact.path.display(), source);
            OutcomeStatus::Failed(source.to_string())
        }
    };
    ArtifactOutcome {
        path: artifact.path.clone(),
        status,
    }
}

fn try_write(
    repo: &Path,
    artifact: &Artifact,
    options: &ApplyOptions,
) -> Result<OutcomeStatus, io::Error> {
    let full_path = repo.join(&artifact.path);

    let existing = match fs::read_to_string(&full_path) {
        Ok(text) => Some(text),
        Err(source) if source.kind() == io::ErrorKind::NotFound => None,
        Err(source) => return Err(source),
    };

    // Assemble the complete new content before any write.
    let new_content = match &artifact.managed {
        Some(region) => {
            let outcome = inject_region(
                existing.as_deref(),
                &artifact.body,
                &region.begin,
                &region.end,
            );
            if outcome.needs_confirmation() && !options.force {
                return Ok(OutcomeStatus::NeedsConfirmation);
            }
            outcome.content
        }
        None => artifact.body.clone(),
    };

    if existing.as_deref() == Some(new_content.as_str()) {
        return Ok(OutcomeStatus::Unchanged);
    }

    if !options.dry_run {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, new_content.as_bytes())?;
        tracing::debug!("wrote {}", full_path.display());
    }
    Ok(OutcomeStatus::Written)
}
