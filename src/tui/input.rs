//! Cursor movement for keyboard navigation.

use crate::state::Square;
use crossterm::event::KeyCode;

/// Moves the cursor one square, clamped to the board edges.
pub(crate) fn move_cursor(cursor: Square, key: KeyCode) -> Square {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(7), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(7)),
        _ => (row, col),
    };
    Square { row, col }
}
