#![forbid(unsafe_code)]

mod failure_summary;
mod git;
mod handoff;

use clap::{Parser, Subcommand};
use handoff::Role;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fm_runner",
    version,
    about = "Foreman handoff gates: check role result files and write failure summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate `<role>_result.json` in a worktree and report changed files.
    CheckHandoff {
        #[arg(value_enum)]
        role: Role,
        /// Worktree root (default: current directory).
        #[arg(long)]
        worktree: Option<PathBuf>,
    },
    /// Build the rejection report for a failed handoff.
    FailureSummary {
        #[arg(long)]
        status: String,
        #[arg(long)]
        reason: String,
        /// Output of an earlier `check-handoff` run.
        #[arg(long = "raw-json", allow_hyphen_values = true)]
        raw_json: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOREMAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let line = match cli.command {
        Command::CheckHandoff { role, worktree } => {
            let worktree = match worktree {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let report = handoff::check_handoff(role, &worktree)?;
            tracing::info!(role = role.as_str(), status = ?report.status, "handoff checked");
            serde_json::to_string(&report)?
        }
        Command::FailureSummary {
            status,
            reason,
            raw_json,
        } => serde_json::to_string(&failure_summary::summarize(&status, &reason, &raw_json))?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}
