#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub(crate) const DEFAULT_LOG_SUBDIR: &str = ".opencode/session-log";

#[derive(Parser, Debug)]
#[command(
    name = "fm_mcp",
    version,
    about = "Foreman agent tools: JSON file IO and result validation over MCP stdio"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "FOREMAN_ROOT",
        help = "Base directory for relative tool paths (default: current directory)"
    )]
    pub(crate) root: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "FOREMAN_SESSION_LOG_DIR",
        help = "Session log directory (default: <root>/.opencode/session-log)"
    )]
    pub(crate) log_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "FOREMAN_NO_SESSION_LOG",
        help = "Do not record tool calls in the session log"
    )]
    pub(crate) no_session_log: bool,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Serve the tools over stdio JSON-RPC (default).
    Serve,
    /// Record one "before tool execution" event read from stdin.
    Hook,
}

#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) root: PathBuf,
    pub(crate) log_dir: PathBuf,
    pub(crate) session_log: bool,
}

impl Config {
    pub(crate) fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self::new(root, cli.log_dir.clone(), !cli.no_session_log))
    }

    pub(crate) fn new(root: PathBuf, log_dir: Option<PathBuf>, session_log: bool) -> Self {
        let log_dir = match log_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => root.join(dir),
            None => root.join(DEFAULT_LOG_SUBDIR),
        };
        Self {
            root,
            log_dir,
            session_log,
        }
    }
}
