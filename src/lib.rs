//! Terminal client for a remote chess engine.
//!
//! The engine owns the rules (legality, check and mate detection, castling
//! and en-passant bookkeeping); this crate renders the board from server
//! snapshots and keeps its local state consistent with the server's.
//!
//! # Architecture
//!
//! - **API Client** ([`ChessApi`] / [`HttpClient`]): the sole network
//!   boundary, typed requests over HTTP/JSON.
//! - **Selection Controller** ([`Selection`] + [`classify_click`]): a pure
//!   state machine deciding what each board click does.
//! - **App Controller** ([`GameController`]): owns the canonical
//!   [`BoardState`], merges server responses, holds the one error message.
//! - **Board View** ([`tui`]): a stateless projection of the above onto a
//!   terminal grid.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod controller;
mod promotion;
mod selection;
mod state;

/// Terminal front end.
pub mod tui;

// Crate-level exports - API client
pub use client::{ApiError, ChessApi, HttpClient, MoveResponse};

// Crate-level exports - App controller
pub use controller::GameController;

// Crate-level exports - Promotion resolution
pub use promotion::{AutoQueen, Fixed, PromotionChoice, PromotionResolver, is_promotion};

// Crate-level exports - Selection state machine
pub use selection::{ClickOutcome, Selection, classify_click};

// Crate-level exports - Domain types
pub use state::{
    Board, BoardState, Color, EMPTY_SQUARE, GameStatus, Piece, PieceKind, Square, Status,
};
