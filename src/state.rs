//! Core domain types for the chess client.
//!
//! Everything here mirrors the wire encoding of the remote engine: piece
//! codes are two-character strings like `wP`, rows and columns run 0-7 with
//! row 0 on the white promotion edge.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The server's marker for an empty square.
pub const EMPTY_SQUARE: &str = "--";

/// Side to move / piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// White, encoded as `w`. Moves first.
    #[serde(rename = "w")]
    White,
    /// Black, encoded as `b`.
    #[serde(rename = "b")]
    Black,
}

impl Color {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-character wire code (`w` or `b`).
    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Kind of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Pawn (`P`).
    Pawn,
    /// Knight (`N`).
    Knight,
    /// Bishop (`B`).
    Bishop,
    /// Rook (`R`).
    Rook,
    /// Queen (`Q`).
    Queen,
    /// King (`K`).
    King,
}

impl PieceKind {
    /// Parses the single-letter wire code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece parsed from the server's two-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Which side owns the piece.
    pub color: Color,
    /// What the piece is.
    pub kind: PieceKind,
}

impl Piece {
    /// Parses a code like `wP` or `bK`. The empty-square sentinel and any
    /// unknown code yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = match chars.next()? {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return None,
        };
        let kind = PieceKind::from_code(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece { color, kind })
    }
}

/// A board coordinate; both row and column are in 0..8.
///
/// Row 0 is the rank nearest the white promotion edge: white pawns promote
/// arriving at row 0, black pawns at row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub(crate) row: u8,
    pub(crate) col: u8,
}

impl Square {
    /// Builds a square, rejecting out-of-range coordinates.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Square { row, col })
    }

    /// Row index, 0-7.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index, 0-7.
    pub fn col(self) -> u8 {
        self.col
    }
}

/// The 8×8 grid of piece codes as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board(Vec<Vec<String>>);

impl Board {
    /// Builds a board from rows of piece codes. Intended for tests and
    /// fixtures; live boards arrive by deserialization.
    pub fn from_rows(rows: [[&str; 8]; 8]) -> Self {
        Board(
            rows.iter()
                .map(|row| row.iter().map(|code| (*code).to_string()).collect())
                .collect(),
        )
    }

    /// True when the grid is exactly 8 rows of 8 columns.
    pub fn is_valid_shape(&self) -> bool {
        self.0.len() == 8 && self.0.iter().all(|row| row.len() == 8)
    }

    /// Raw piece code at `square`, if the board has that cell.
    pub fn code_at(&self, square: Square) -> Option<&str> {
        self.0
            .get(square.row as usize)
            .and_then(|row| row.get(square.col as usize))
            .map(String::as_str)
    }

    /// The piece at `square`, or `None` for an empty or missing cell.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.code_at(square).and_then(Piece::from_code)
    }

    /// True when `square` holds a piece belonging to `side`.
    pub fn has_own_piece(&self, square: Square, side: Color) -> bool {
        self.piece_at(square).is_some_and(|piece| piece.color == side)
    }
}

/// Whether the game is still being played or how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Moves are still being made.
    InProgress,
    /// The side to move is mated; `winner` names the other side.
    Checkmate,
    /// The side to move has no legal move but is not in check.
    Stalemate,
}

/// Terminal status as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// Current phase of the game.
    pub status: Status,
    /// Winning side, present only for checkmate.
    pub winner: Option<Color>,
}

impl GameStatus {
    /// True once the game has reached a terminal state.
    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }
}

/// The full authoritative game snapshot as last received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 8×8 grid of piece codes.
    pub board: Board,
    /// Side to move.
    pub turn: Color,
    /// Moves played since the last reset.
    pub history_len: u64,
    /// Per-piece move counts the engine uses for castling eligibility.
    /// Opaque to the client beyond pass-through.
    pub has_moved: HashMap<String, u32>,
    /// In-progress or terminal status.
    pub game_status: GameStatus,
}

impl BoardState {
    /// True once the game has reached checkmate or stalemate; frozen until
    /// the next reset.
    pub fn is_game_over(&self) -> bool {
        self.game_status.is_over()
    }
}
