//! Stateless rendering of the board, status, and controls.

use super::Mode;
use crate::client::ChessApi;
use crate::controller::GameController;
use crate::selection::Selection;
use crate::state::{BoardState, Color as Side, Piece, PieceKind, Square, Status};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the whole screen from controller state.
pub(crate) fn draw<C: ChessApi>(
    frame: &mut Frame,
    controller: &GameController<C>,
    cursor: Square,
    mode: Mode,
) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Error
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Chess")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match controller.state() {
        Some(state) => draw_board(frame, chunks[1], state, controller.selection(), cursor),
        None => {
            // Never render a malformed board; a placeholder until the
            // first load lands.
            let placeholder = if controller.is_loading() {
                "Loading..."
            } else {
                "No game loaded"
            };
            let widget = Paragraph::new(placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(widget, center_rect(chunks[1], 30, 1));
        }
    }

    let status = Paragraph::new(status_text(controller, mode))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    if let Some(message) = controller.error() {
        let error_line = Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error_line, chunks[3]);
    }

    let help = Paragraph::new("arrows: move  enter: select/move  u: undo  r: reset  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn status_text<C: ChessApi>(controller: &GameController<C>, mode: Mode) -> String {
    if let Mode::Promote { .. } = mode {
        return "Promote to: [Q]ueen  [R]ook  [B]ishop  k[N]ight  (Esc: queen)".to_string();
    }
    if controller.is_loading() {
        return "Loading...".to_string();
    }
    let Some(state) = controller.state() else {
        return "Could not load the game - press r to start a fresh one".to_string();
    };
    match state.game_status.status {
        Status::InProgress => format!("{} to move", state.turn.name()),
        Status::Checkmate => {
            let winner = state.game_status.winner.map(Side::name).unwrap_or("Nobody");
            format!("Checkmate! {winner} wins! Press r to play again.")
        }
        Status::Stalemate => "Stalemate! Press r to play again.".to_string(),
    }
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    state: &BoardState,
    selection: &Selection,
    cursor: Square,
) {
    let board_area = center_rect(area, 28, 9);

    let mut lines = Vec::with_capacity(9);
    for row in 0..8u8 {
        let mut spans = vec![Span::styled(
            format!("{} ", 8 - row),
            Style::default().fg(Color::DarkGray),
        )];
        for col in 0..8u8 {
            let square = Square { row, col };
            let cell = match state.board.piece_at(square) {
                Some(piece) => format!(" {} ", glyph(piece)),
                None => "   ".to_string(),
            };
            spans.push(Span::styled(
                cell,
                square_style(state, selection, cursor, square),
            ));
        }
        lines.push(Line::from(spans));
    }

    let mut files = String::from("  ");
    for file in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'] {
        files.push(' ');
        files.push(file);
        files.push(' ');
    }
    lines.push(Line::from(Span::styled(
        files,
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), board_area);
}

/// Highlight priority: cursor, then selection, then legal destinations,
/// then the checkerboard.
fn square_style(
    state: &BoardState,
    selection: &Selection,
    cursor: Square,
    square: Square,
) -> Style {
    let piece_fg = match state.board.piece_at(square).map(|piece| piece.color) {
        Some(Side::White) => Color::White,
        Some(Side::Black) => Color::Black,
        None => Color::DarkGray,
    };

    if square == cursor {
        return Style::default()
            .bg(Color::Cyan)
            .fg(piece_fg)
            .add_modifier(Modifier::BOLD);
    }
    if selection.selected_square() == Some(square) {
        return Style::default()
            .bg(Color::Yellow)
            .fg(piece_fg)
            .add_modifier(Modifier::BOLD);
    }
    if selection.is_legal_destination(square) {
        return Style::default().bg(Color::Green).fg(piece_fg);
    }

    let light = (square.row() + square.col()) % 2 == 0;
    let bg = if light { Color::Gray } else { Color::DarkGray };
    Style::default().bg(bg).fg(piece_fg)
}

fn glyph(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Side::White, PieceKind::King) => '♔',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::Black, PieceKind::King) => '♚',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Pawn) => '♟',
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
