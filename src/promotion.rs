//! Pawn promotion: the choice type and the resolver port.
//!
//! The controller never blocks on a modal prompt. When a move needs a
//! promotion choice it asks a [`PromotionResolver`]; the TUI wires in its
//! dialog, tests wire in a deterministic stub.

use crate::state::{Color, Piece, PieceKind, Square};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Piece a pawn may become on reaching the back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromotionChoice {
    /// Promote to a queen (`Q`), the default.
    #[serde(rename = "Q")]
    Queen,
    /// Promote to a rook (`R`).
    #[serde(rename = "R")]
    Rook,
    /// Promote to a bishop (`B`).
    #[serde(rename = "B")]
    Bishop,
    /// Promote to a knight (`N`).
    #[serde(rename = "N")]
    Knight,
}

impl PromotionChoice {
    /// Parses a typed key, case-insensitively. `n` is the knight.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'Q' => Some(PromotionChoice::Queen),
            'R' => Some(PromotionChoice::Rook),
            'B' => Some(PromotionChoice::Bishop),
            'N' => Some(PromotionChoice::Knight),
            _ => None,
        }
    }

    /// Single-letter wire code.
    pub fn code(self) -> char {
        match self {
            PromotionChoice::Queen => 'Q',
            PromotionChoice::Rook => 'R',
            PromotionChoice::Bishop => 'B',
            PromotionChoice::Knight => 'N',
        }
    }
}

/// True when moving `piece` to `to` requires a promotion choice: a white
/// pawn arriving at row 0 or a black pawn arriving at row 7.
pub fn is_promotion(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn
        && match piece.color {
            Color::White => to.row() == 0,
            Color::Black => to.row() == 7,
        }
}

/// Supplies the promotion choice when a pawn reaches the back rank.
///
/// Yielding `None` means no valid choice was made; the controller falls
/// back to a queen.
#[async_trait]
pub trait PromotionResolver: Send {
    /// Picks the piece a pawn of `color` becomes.
    async fn choose(&mut self, color: Color) -> Option<PromotionChoice>;
}

/// Resolver that always promotes to a queen.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoQueen;

#[async_trait]
impl PromotionResolver for AutoQueen {
    async fn choose(&mut self, _color: Color) -> Option<PromotionChoice> {
        Some(PromotionChoice::Queen)
    }
}

/// Resolver with a predetermined outcome. The TUI prompt collects the
/// player's key first and hands the result in through this; tests script it.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub Option<PromotionChoice>);

#[async_trait]
impl PromotionResolver for Fixed {
    async fn choose(&mut self, _color: Color) -> Option<PromotionChoice> {
        self.0
    }
}
