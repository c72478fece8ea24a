#![forbid(unsafe_code)]

mod config;
mod entry;
mod server;
mod support;
mod tools;

use clap::Parser;
use config::{Cli, Command, Config};
use server::McpServer;

pub(crate) use support::*;

// Some MCP clients are strict about the server echoing a compatible protocol version.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "foreman-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let command = cli.command.unwrap_or(Command::Serve);
    let config = Config::from_cli(&cli)?;
    tracing::debug!(root = %config.root.display(), log_dir = %config.log_dir.display(), "config resolved");

    match command {
        Command::Serve => {
            let mut server = McpServer::new(&config);
            tracing::info!(version = SERVER_VERSION, "serving tools on stdio");
            let mut stdout = std::io::stdout().lock();
            entry::run_stdio(&mut server, std::io::stdin().lock(), &mut stdout)?;
            tracing::info!("stdin closed; exiting");
        }
        Command::Hook => entry::run_hook(&config, std::io::stdin().lock()),
    }
    Ok(())
}
