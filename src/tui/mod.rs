//! Terminal UI for the chess client.
//!
//! A thin view over [`GameController`]: the event loop turns cursor
//! gestures into board clicks, and rendering is a stateless projection of
//! controller state.

mod input;
mod ui;

use crate::client::HttpClient;
use crate::controller::GameController;
use crate::promotion::{AutoQueen, Fixed, PromotionChoice};
use crate::state::Square;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// What the next key press means.
#[derive(Debug, Clone, Copy)]
enum Mode {
    /// Keys navigate the board.
    Normal,
    /// A click on `target` would promote; keys pick the piece.
    Promote {
        /// The promotion destination awaiting a choice.
        target: Square,
    },
}

/// Runs the TUI against the engine at `server_url`, logging to `log_file`.
pub async fn run(server_url: String, log_file: std::path::PathBuf) -> Result<()> {
    // Log to a file so tracing output never interferes with the TUI.
    let log = std::fs::File::create(&log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log))
        .with_ansi(false)
        .try_init();

    info!(server_url = %server_url, "Starting chess TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let controller = GameController::new(HttpClient::new(server_url));
    let res = run_loop(&mut terminal, controller).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut controller: GameController<HttpClient>,
) -> Result<()> {
    controller.initialize().await;

    // Start on white's king pawn.
    let mut cursor = Square { row: 6, col: 4 };
    let mut mode = Mode::Normal;

    loop {
        terminal.draw(|frame| ui::draw(frame, &controller, cursor, mode))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match mode {
            Mode::Promote { target } => match key.code {
                // Dismissing the prompt resolves to no choice; the
                // controller falls back to a queen.
                KeyCode::Esc => {
                    controller.handle_click(target, &mut Fixed(None)).await;
                    mode = Mode::Normal;
                }
                KeyCode::Char(c) => {
                    if let Some(choice) = PromotionChoice::from_key(c) {
                        info!(choice = %choice.code(), "promotion picked");
                        controller
                            .handle_click(target, &mut Fixed(Some(choice)))
                            .await;
                        mode = Mode::Normal;
                    }
                }
                _ => {}
            },
            Mode::Normal => match key.code {
                KeyCode::Char('q') => {
                    info!("User quit");
                    return Ok(());
                }
                KeyCode::Char('r') => controller.apply_reset().await,
                KeyCode::Char('u') => controller.apply_undo().await,
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    cursor = input::move_cursor(cursor, key.code);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if controller.promotion_color_for(cursor).is_some() {
                        mode = Mode::Promote { target: cursor };
                    } else {
                        controller.handle_click(cursor, &mut AutoQueen).await;
                    }
                }
                _ => {}
            },
        }
    }
}
