//! Canonical game state and the action dispatch around it.
//!
//! The controller owns the single [`BoardState`] the session treats as
//! ground truth. Every mutation flows through the API client and is merged
//! back in here; the view only reads.

use crate::client::{ChessApi, MoveResponse};
use crate::promotion::{self, PromotionChoice, PromotionResolver};
use crate::selection::{ClickOutcome, Selection, classify_click};
use crate::state::{BoardState, Color, Square};
use tracing::{debug, info, warn};

/// A legal-move query in flight, tagged so a stale response cannot apply
/// to a since-changed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLegal {
    square: Square,
    token: u64,
}

/// Owns the canonical [`BoardState`] for the session, drives the initial
/// load, dispatches user actions through the API client, and holds the
/// single current error message.
#[derive(Debug)]
pub struct GameController<C> {
    api: C,
    state: Option<BoardState>,
    loading: bool,
    error: Option<String>,
    selection: Selection,
    legal_token: u64,
    pending_legal: Option<PendingLegal>,
}

impl<C: ChessApi> GameController<C> {
    /// Creates a controller with no state loaded yet.
    pub fn new(api: C) -> Self {
        Self {
            api,
            state: None,
            loading: false,
            error: None,
            selection: Selection::Empty,
            legal_token: 0,
            pending_legal: None,
        }
    }

    /// Canonical state, `None` until the first load completes.
    pub fn state(&self) -> Option<&BoardState> {
        self.state.as_ref()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Latest error message. Cleared by the next successful action,
    /// replaced by the next failed one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while the initial load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Side to move, once state is loaded.
    pub fn turn(&self) -> Option<Color> {
        self.state.as_ref().map(|state| state.turn)
    }

    /// True once the game has reached checkmate or stalemate.
    pub fn is_game_over(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(BoardState::is_game_over)
    }

    /// True when undo may be offered: at least one move was played and the
    /// game is still in progress.
    pub fn can_undo(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.history_len > 0 && !state.is_game_over())
    }

    /// Loads the initial snapshot. A second call while one is in flight is
    /// a no-op; on failure the error is recorded and state stays `None`.
    pub async fn initialize(&mut self) {
        if self.loading {
            debug!("initial load already in flight");
            return;
        }
        self.loading = true;
        match self.api.get_state().await {
            Ok(state) => {
                info!(turn = %state.turn.code(), history_len = state.history_len, "initial state loaded");
                self.replace_state(state);
            }
            Err(err) => {
                warn!(error = %err, "initial load failed");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Routes a board click through the selection machine.
    ///
    /// Clicks are suppressed entirely while loading, before the first load,
    /// and once the game is over; no request is issued in those cases.
    pub async fn handle_click(&mut self, clicked: Square, resolver: &mut dyn PromotionResolver) {
        let outcome = {
            let Some(state) = self.state.as_ref() else {
                return;
            };
            if self.loading || state.is_game_over() {
                return;
            }
            classify_click(&self.selection, &state.board, state.turn, clicked)
        };

        match outcome {
            ClickOutcome::Ignore => {}
            ClickOutcome::Clear => self.clear_selection(),
            ClickOutcome::QueryLegal { square } => {
                let token = self.begin_legal_query(square);
                let legal = self.api.legal_moves(square).await;
                self.finish_legal_query(square, token, legal);
            }
            ClickOutcome::Submit { from, to } => {
                let promotion = self.resolve_promotion(from, to, resolver).await;
                // Selection always clears once a move is attempted,
                // whatever the server says.
                self.clear_selection();
                self.apply_move(from, to, promotion).await;
            }
        }
    }

    /// Tags an outbound legal-move query with a fresh token. Only a result
    /// carrying the returned token may apply.
    pub fn begin_legal_query(&mut self, square: Square) -> u64 {
        self.legal_token += 1;
        self.pending_legal = Some(PendingLegal {
            square,
            token: self.legal_token,
        });
        self.legal_token
    }

    /// Applies a legal-move result if it belongs to the most recently
    /// issued query; stale results are discarded silently.
    pub fn finish_legal_query(&mut self, square: Square, token: u64, legal: Vec<Square>) {
        if self.pending_legal != Some(PendingLegal { square, token }) {
            debug!(token, "discarding stale legal-move result");
            return;
        }
        self.pending_legal = None;
        debug!(
            row = square.row(),
            col = square.col(),
            count = legal.len(),
            "piece selected"
        );
        self.selection = Selection::Selected { square, legal };
    }

    /// Submits a move and merges the response into canonical state:
    /// `board`, `turn`, and `game_status` are overwritten from the server;
    /// `history_len` takes the server's count when reported and a local
    /// increment otherwise. A failure leaves state entirely unchanged.
    pub async fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PromotionChoice>,
    ) {
        match self.api.submit_move(from, to, promotion).await {
            Ok(response) => self.merge_move_response(response),
            Err(err) => {
                warn!(error = %err, "move rejected");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Reverts the last move. A no-op while nothing can be undone; on
    /// success the response replaces local state wholesale.
    pub async fn apply_undo(&mut self) {
        if !self.can_undo() {
            debug!("undo unavailable");
            return;
        }
        match self.api.undo().await {
            Ok(state) => {
                info!(history_len = state.history_len, "move undone");
                self.replace_state(state);
            }
            Err(err) => {
                warn!(error = %err, "undo failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Starts a fresh game. Always invocable; on success the response
    /// replaces local state wholesale.
    pub async fn apply_reset(&mut self) {
        match self.api.reset().await {
            Ok(state) => {
                info!("game reset");
                self.replace_state(state);
            }
            Err(err) => {
                warn!(error = %err, "reset failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// The color of the pawn that would promote if `clicked` were clicked
    /// now, used by the view to open its promotion prompt first.
    pub fn promotion_color_for(&self, clicked: Square) -> Option<Color> {
        let state = self.state.as_ref()?;
        if self.loading || state.is_game_over() {
            return None;
        }
        if !self.selection.is_legal_destination(clicked) {
            return None;
        }
        let from = self.selection.selected_square()?;
        let piece = state.board.piece_at(from)?;
        promotion::is_promotion(piece, clicked).then_some(piece.color)
    }

    async fn resolve_promotion(
        &mut self,
        from: Square,
        to: Square,
        resolver: &mut dyn PromotionResolver,
    ) -> Option<PromotionChoice> {
        let piece = self.state.as_ref()?.board.piece_at(from)?;
        if !promotion::is_promotion(piece, to) {
            return None;
        }
        let choice = resolver
            .choose(piece.color)
            .await
            .unwrap_or(PromotionChoice::Queen);
        debug!(choice = %choice.code(), "promotion resolved");
        Some(choice)
    }

    fn merge_move_response(&mut self, response: MoveResponse) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.history_len = response
            .history_len
            .unwrap_or(state.history_len + 1);
        state.board = response.board;
        state.turn = response.turn;
        state.game_status = response.game_status;
        info!(
            turn = %state.turn.code(),
            history_len = state.history_len,
            game_over = state.is_game_over(),
            "move applied"
        );
        self.error = None;
        // The turn changed; the forced transition clears the selection.
        self.clear_selection();
    }

    fn replace_state(&mut self, state: BoardState) {
        self.state = Some(state);
        self.error = None;
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
        self.pending_legal = None;
    }
}
