//! Chess TUI - terminal client for a remote chess engine.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let server_url = cli.resolve_server_url();

    chess_tui::tui::run(server_url, cli.log_file).await
}
