// apply.rs — `credo apply`: compile the registry into a target repository.

use std::io::{self, BufRead, Write};
use std::path::Path;

use credo_compiler::{apply, ApplyOptions, ArtifactOutcome, OutcomeStatus};

use super::parse_chain;

pub fn execute(
    registry: &Path,
    repo: &Path,
    scopes: &[String],
    force: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let chain = parse_chain(scopes)?;
    tracing::info!("applying scope chain {} to {}", chain, repo.display());

    let mut options = ApplyOptions {
        registry_root: registry.to_path_buf(),
        target_repo: repo.to_path_buf(),
        chain,
        force,
        dry_run,
    };

    let mut outcomes = apply(&options)?;

    // Malformed or missing markers downgrade to a confirmation gate. Ask
    // once, then re-run with the override; artifacts already written come
    // back as Unchanged, so the second pass only appends the gated region.
    if !force && !dry_run && outcomes.iter().any(needs_confirmation) {
        let gated: Vec<&ArtifactOutcome> =
            outcomes.iter().filter(|o| needs_confirmation(o)).collect();
        for outcome in &gated {
            println!(
                "{}: managed markers missing or malformed; the generated region would be appended after the existing content.",
                outcome.path.display()
            );
        }
        if confirm("Append fresh markers to the file(s) above?")? {
            options.force = true;
            outcomes = apply(&options)?;
        }
    }

    report(&outcomes, dry_run);

    if outcomes.iter().any(|o| o.is_failure()) {
        anyhow::bail!("one or more artifacts failed to write");
    }
    Ok(())
}

fn needs_confirmation(outcome: &ArtifactOutcome) -> bool {
    outcome.status == OutcomeStatus::NeedsConfirmation
}

fn report(outcomes: &[ArtifactOutcome], dry_run: bool) {
    if dry_run {
        println!("Dry run — nothing was written.");
    }
    for outcome in outcomes {
        let status = match &outcome.status {
            OutcomeStatus::Written => "written".to_string(),
            OutcomeStatus::Unchanged => "unchanged".to_string(),
            OutcomeStatus::NeedsConfirmation => "skipped (needs confirmation)".to_string(),
            OutcomeStatus::Failed(reason) => format!("FAILED: {}", reason),
        };
        println!("  {:<40} {}", outcome.path.display().to_string(), status);
    }

    let written = outcomes
        .iter()
        .filter(|o| o.status == OutcomeStatus::Written)
        .count();
    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        println!("{} artifact(s) written, {} failed.", written, failed);
    } else {
        println!("{} artifact(s) written.", written);
    }
}

/// Plain y/N prompt on stdin.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
