//! # credo-cli
//!
//! Command-line interface for the Credo policy compiler.
//!
//! - `credo apply` — compile the registry into AGENTS.md and the mirrored
//!   slash-command prompts for a target repository
//! - `credo doctor` — print the effective resolved configuration for a
//!   scope chain
//! - `credo schema` — write the published registry schema documents

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Credo CLI — compile policy charters into AI assistant artifacts.
#[derive(Parser)]
#[command(name = "credo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the registry and write artifacts into a repository.
    Apply {
        /// Policy registry root (the directory holding charter.yaml).
        #[arg(long, default_value = ".credo/policy-registry")]
        registry: PathBuf,
        /// Target repository path.
        #[arg(long, short, default_value = ".")]
        repo: PathBuf,
        /// Scope precedence, ascending; repeatable
        /// (e.g. -s global -s team:backend).
        #[arg(long, short, default_value = "global")]
        scope: Vec<String>,
        /// Append a fresh managed region without asking when markers are
        /// missing or malformed.
        #[arg(long)]
        force: bool,
        /// Show per-artifact outcomes without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective configuration for a scope chain.
    Doctor {
        /// Policy registry root.
        #[arg(long, default_value = ".credo/policy-registry")]
        registry: PathBuf,
        /// Scope precedence, ascending; repeatable.
        #[arg(long, short, default_value = "global")]
        scope: Vec<String>,
        /// Output format: text or json.
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write the published registry schema documents.
    Schema {
        /// Directory to write charter.schema.json and behavior.schema.json
        /// into (prints to stdout when omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Apply {
            registry,
            repo,
            scope,
            force,
            dry_run,
        } => commands::apply::execute(registry, repo, scope, *force, *dry_run),
        Commands::Doctor {
            registry,
            scope,
            format,
        } => commands::doctor::execute(registry, scope, format),
        Commands::Schema { out } => commands::schema::execute(out.as_deref()),
    }
}
