//! Selection state machine for the board.
//!
//! The selection is an explicit tagged variant processed by a pure
//! transition function, so the click behavior is unit-testable without a
//! rendering surface or a network.

use crate::state::{Board, Color, Square};

/// Client-local record of the currently chosen source square and its
/// cached legal destinations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Empty,
    /// A piece of the side to move is selected.
    Selected {
        /// Source square of the selected piece.
        square: Square,
        /// Destinations reported by the last legal-move query for `square`.
        legal: Vec<Square>,
    },
}

impl Selection {
    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// The selected source square, if any.
    pub fn selected_square(&self) -> Option<Square> {
        match self {
            Selection::Empty => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    /// Cached legal destinations for the selected piece.
    pub fn legal_destinations(&self) -> &[Square] {
        match self {
            Selection::Empty => &[],
            Selection::Selected { legal, .. } => legal,
        }
    }

    /// True when `square` is a cached legal destination.
    pub fn is_legal_destination(&self, square: Square) -> bool {
        self.legal_destinations().contains(&square)
    }

    /// Resets to [`Selection::Empty`].
    pub fn clear(&mut self) {
        *self = Selection::Empty;
    }
}

/// What a click should do, decided before any network traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No state change and no request.
    Ignore,
    /// Query legal destinations for the piece on `square` and select it.
    QueryLegal {
        /// The clicked square holding a piece of the side to move.
        square: Square,
    },
    /// Submit a move; the selection clears once the attempt is made,
    /// regardless of the outcome.
    Submit {
        /// Currently selected source square.
        from: Square,
        /// Clicked destination, taken from the cached legal list.
        to: Square,
    },
    /// Drop the current selection.
    Clear,
}

/// Decides what a click on `clicked` does given the current selection,
/// board, and side to move.
///
/// The legal-destination check runs before the own-piece check so a capture
/// of a legal target is a move, and re-clicking any own piece (including
/// the selected one) re-queries its destinations.
pub fn classify_click(
    selection: &Selection,
    board: &Board,
    turn: Color,
    clicked: Square,
) -> ClickOutcome {
    match selection {
        Selection::Empty => {
            if board.has_own_piece(clicked, turn) {
                ClickOutcome::QueryLegal { square: clicked }
            } else {
                ClickOutcome::Ignore
            }
        }
        Selection::Selected { square, legal } => {
            if legal.contains(&clicked) {
                ClickOutcome::Submit {
                    from: *square,
                    to: clicked,
                }
            } else if board.has_own_piece(clicked, turn) {
                ClickOutcome::QueryLegal { square: clicked }
            } else {
                ClickOutcome::Clear
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board() -> Board {
        Board::from_rows([
            ["bR", "--", "--", "--", "bK", "--", "--", "--"],
            ["--", "--", "--", "--", "--", "--", "--", "--"],
            ["--", "--", "bP", "--", "--", "--", "--", "--"],
            ["--", "--", "--", "--", "--", "--", "--", "--"],
            ["--", "--", "--", "--", "--", "--", "--", "--"],
            ["--", "--", "--", "--", "--", "--", "--", "--"],
            ["--", "wP", "--", "wP", "--", "--", "--", "--"],
            ["--", "--", "--", "--", "wK", "--", "--", "--"],
        ])
    }

    fn selected(square: Square, legal: Vec<Square>) -> Selection {
        Selection::Selected { square, legal }
    }

    #[test]
    fn unselected_click_on_empty_square_is_ignored() {
        let outcome = classify_click(&Selection::Empty, &board(), Color::White, sq(4, 4));
        assert_eq!(outcome, ClickOutcome::Ignore);
    }

    #[test]
    fn unselected_click_on_opponent_piece_is_ignored() {
        let outcome = classify_click(&Selection::Empty, &board(), Color::White, sq(2, 2));
        assert_eq!(outcome, ClickOutcome::Ignore);
    }

    #[test]
    fn unselected_click_on_own_piece_queries() {
        let outcome = classify_click(&Selection::Empty, &board(), Color::White, sq(6, 1));
        assert_eq!(
            outcome,
            ClickOutcome::QueryLegal { square: sq(6, 1) }
        );
    }

    #[test]
    fn click_on_cached_destination_submits() {
        let selection = selected(sq(6, 1), vec![sq(5, 1), sq(4, 1)]);
        let outcome = classify_click(&selection, &board(), Color::White, sq(4, 1));
        assert_eq!(
            outcome,
            ClickOutcome::Submit {
                from: sq(6, 1),
                to: sq(4, 1),
            }
        );
    }

    #[test]
    fn capture_of_legal_target_beats_reselect() {
        // A legal destination wins even if occupied; the engine only lists
        // capturable squares, so this never targets an own piece.
        let selection = selected(sq(6, 1), vec![sq(2, 2)]);
        let outcome = classify_click(&selection, &board(), Color::White, sq(2, 2));
        assert_eq!(
            outcome,
            ClickOutcome::Submit {
                from: sq(6, 1),
                to: sq(2, 2),
            }
        );
    }

    #[test]
    fn click_on_other_own_piece_reselects() {
        let selection = selected(sq(6, 1), vec![sq(5, 1)]);
        let outcome = classify_click(&selection, &board(), Color::White, sq(6, 3));
        assert_eq!(
            outcome,
            ClickOutcome::QueryLegal { square: sq(6, 3) }
        );
    }

    #[test]
    fn click_on_selected_square_requeries() {
        let selection = selected(sq(6, 1), vec![sq(5, 1)]);
        let outcome = classify_click(&selection, &board(), Color::White, sq(6, 1));
        assert_eq!(
            outcome,
            ClickOutcome::QueryLegal { square: sq(6, 1) }
        );
    }

    #[test]
    fn click_elsewhere_clears_selection() {
        let selection = selected(sq(6, 1), vec![sq(5, 1)]);
        // Empty square that is not a cached destination.
        let outcome = classify_click(&selection, &board(), Color::White, sq(3, 3));
        assert_eq!(outcome, ClickOutcome::Clear);

        // Opponent piece that is not a cached destination.
        let outcome = classify_click(&selection, &board(), Color::White, sq(0, 0));
        assert_eq!(outcome, ClickOutcome::Clear);
    }

    #[test]
    fn black_to_move_selects_black_pieces_only() {
        let outcome = classify_click(&Selection::Empty, &board(), Color::Black, sq(2, 2));
        assert_eq!(
            outcome,
            ClickOutcome::QueryLegal { square: sq(2, 2) }
        );
        let outcome = classify_click(&Selection::Empty, &board(), Color::Black, sq(6, 1));
        assert_eq!(outcome, ClickOutcome::Ignore);
    }

    #[test]
    fn selection_accessors() {
        let mut selection = selected(sq(6, 1), vec![sq(5, 1)]);
        assert!(!selection.is_empty());
        assert_eq!(selection.selected_square(), Some(sq(6, 1)));
        assert!(selection.is_legal_destination(sq(5, 1)));
        assert!(!selection.is_legal_destination(sq(4, 1)));
        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.legal_destinations().is_empty());
    }
}
