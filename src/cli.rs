//! Command-line interface for the chess TUI.

use clap::Parser;

/// Terminal client for a remote chess engine.
#[derive(Parser, Debug)]
#[command(name = "chess_tui")]
#[command(about = "Play chess against a remote engine from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the engine API. Falls back to the CHESS_SERVER_URL
    /// environment variable, then to http://localhost:8000.
    #[arg(long)]
    pub server_url: Option<String>,

    /// File tracing output is written to; the TUI owns the terminal.
    #[arg(long, default_value = "chess_tui.log")]
    pub log_file: std::path::PathBuf,
}

impl Cli {
    /// Resolves the server URL from the flag, the environment, or the
    /// default, in that order.
    pub fn resolve_server_url(&self) -> String {
        self.server_url
            .clone()
            .or_else(|| std::env::var("CHESS_SERVER_URL").ok())
            .unwrap_or_else(|| "http://localhost:8000".to_string())
    }
}
