//! HTTP client for the remote chess engine.
//!
//! The engine owns all rules; this module is the sole network boundary.
//! [`ChessApi`] is the port the controller talks to, [`HttpClient`] is the
//! reqwest-backed implementation of it.

use crate::promotion::PromotionChoice;
use crate::state::{Board, BoardState, Color, GameStatus, Square};
use async_trait::async_trait;
use derive_more::{Display, Error, From};
use reqwest::StatusCode;
use reqwest::header::CACHE_CONTROL;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Errors surfaced by the API client.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// The request never reached the server or never came back.
    #[display("request failed: {_0}")]
    Transport(#[error(source)] reqwest::Error),
    /// The server answered with a non-success status. `message` is decoded
    /// from the body with [`extract_error_message`]'s precedence and is
    /// shown to the player verbatim.
    #[display("{message}")]
    #[from(ignore)]
    Protocol {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
    /// The server answered success but the body was not understood.
    #[display("malformed response: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

/// Fields returned by a successful `/move` call.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveResponse {
    /// Board after the move.
    pub board: Board,
    /// Side to move after the move.
    pub turn: Color,
    /// Updated in-progress or terminal status.
    pub game_status: GameStatus,
    /// Server-reported move count; older servers omit it and the
    /// controller increments its local count instead.
    #[serde(default)]
    pub history_len: Option<u64>,
}

/// Boundary to the remote game service. All operations suspend the caller
/// for the network round trip.
#[async_trait]
pub trait ChessApi: Send + Sync {
    /// Fetches the current snapshot; no side effect on the server.
    async fn get_state(&self) -> Result<BoardState, ApiError>;

    /// Legal destinations for the piece on `square`.
    ///
    /// Fails open: any transport failure, non-success status, or malformed
    /// body degrades to an empty list so a transient failure never breaks
    /// the selection UI.
    async fn legal_moves(&self, square: Square) -> Vec<Square>;

    /// Submits a move for server-side validation. `promotion` must be set
    /// exactly when the move takes a pawn to its promotion rank.
    async fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PromotionChoice>,
    ) -> Result<MoveResponse, ApiError>;

    /// Reverts the last move.
    async fn undo(&self) -> Result<BoardState, ApiError>;

    /// Starts a fresh game.
    async fn reset(&self) -> Result<BoardState, ApiError>;
}

#[derive(Debug, Serialize)]
struct CoordRequest {
    row: u8,
    col: u8,
}

#[derive(Debug, Serialize)]
struct MoveRequest {
    from_row: u8,
    from_col: u8,
    to_row: u8,
    to_col: u8,
    // Omitted entirely for non-promotion moves, never sent as null.
    #[serde(skip_serializing_if = "Option::is_none")]
    promotion: Option<PromotionChoice>,
}

/// `/legal` responses use either key depending on the server build.
#[derive(Debug, Deserialize)]
struct LegalResponse {
    #[serde(default)]
    legal_moves: Option<Vec<(u8, u8)>>,
    #[serde(default)]
    moves: Option<Vec<(u8, u8)>>,
}

/// reqwest-backed [`ChessApi`] implementation.
///
/// The single canonical client: error parsing follows the precedence in
/// [`extract_error_message`] for every operation.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Creates a client for the engine at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the status and decodes a full snapshot, shared by `/state`,
    /// `/undo`, and `/reset`.
    async fn read_state(response: reqwest::Response) -> Result<BoardState, ApiError> {
        let body = Self::read_success_body(response).await?;
        let state: BoardState =
            serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))?;
        validate_board(&state.board)?;
        Ok(state)
    }

    /// Returns the body text of a success response, or the decoded
    /// [`ApiError::Protocol`] for anything else.
    async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Protocol {
            status: status.as_u16(),
            message: extract_error_message(&body, status),
        })
    }

    async fn try_legal_moves(&self, square: Square) -> Result<Vec<Square>, ApiError> {
        let response = self
            .client
            .post(self.url("/legal"))
            .json(&CoordRequest {
                row: square.row(),
                col: square.col(),
            })
            .send()
            .await?;
        let body = Self::read_success_body(response).await?;
        let decoded: LegalResponse =
            serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))?;
        let coords = decoded.legal_moves.or(decoded.moves).unwrap_or_default();
        Ok(coords
            .into_iter()
            .filter_map(|(row, col)| Square::new(row, col))
            .collect())
    }
}

#[async_trait]
impl ChessApi for HttpClient {
    #[instrument(skip(self))]
    async fn get_state(&self) -> Result<BoardState, ApiError> {
        debug!("fetching snapshot");
        let response = self.client.get(self.url("/state")).send().await?;
        Self::read_state(response).await
    }

    #[instrument(skip(self))]
    async fn legal_moves(&self, square: Square) -> Vec<Square> {
        match self.try_legal_moves(square).await {
            Ok(moves) => {
                debug!(count = moves.len(), "legal destinations received");
                moves
            }
            Err(err) => {
                warn!(error = %err, "legal-move query failed; treating as no destinations");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    async fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PromotionChoice>,
    ) -> Result<MoveResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/move"))
            .header(CACHE_CONTROL, "no-store")
            .json(&MoveRequest {
                from_row: from.row(),
                from_col: from.col(),
                to_row: to.row(),
                to_col: to.col(),
                promotion,
            })
            .send()
            .await?;
        let body = Self::read_success_body(response).await?;
        let decoded: MoveResponse =
            serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))?;
        validate_board(&decoded.board)?;
        Ok(decoded)
    }

    #[instrument(skip(self))]
    async fn undo(&self) -> Result<BoardState, ApiError> {
        let response = self
            .client
            .post(self.url("/undo"))
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        Self::read_state(response).await
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<BoardState, ApiError> {
        let response = self
            .client
            .post(self.url("/reset"))
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        Self::read_state(response).await
    }
}

fn validate_board(board: &Board) -> Result<(), ApiError> {
    if board.is_valid_shape() {
        Ok(())
    } else {
        Err(ApiError::Malformed("board is not an 8x8 grid".to_string()))
    }
}

/// Decodes a human-readable message from a non-success response body.
///
/// Server error shapes vary; the precedence is fixed and first match wins:
/// a string field `error`, a nested string at `error.error`, a string field
/// `detail`, the decoded body itself as text, and finally the transport
/// status text.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = value
            .get("error")
            .and_then(|v| v.get("error"))
            .and_then(|v| v.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = value.get("detail").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        return value.to_string();
    }
    if !body.trim().is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAD_REQUEST: StatusCode = StatusCode::BAD_REQUEST;

    #[test]
    fn error_field_wins() {
        let body = r#"{"error": "nope", "detail": "ignored"}"#;
        assert_eq!(extract_error_message(body, BAD_REQUEST), "nope");
    }

    #[test]
    fn nested_error_beats_detail() {
        let body = r#"{"error": {"error": "inner"}, "detail": "ignored"}"#;
        assert_eq!(extract_error_message(body, BAD_REQUEST), "inner");
    }

    #[test]
    fn detail_used_when_no_error_field() {
        let body = r#"{"detail": "illegal move"}"#;
        assert_eq!(extract_error_message(body, BAD_REQUEST), "illegal move");
    }

    #[test]
    fn unmatched_json_serialized_back_to_text() {
        let body = r#"{"reason": "who knows"}"#;
        assert_eq!(
            extract_error_message(body, BAD_REQUEST),
            r#"{"reason":"who knows"}"#
        );
    }

    #[test]
    fn plain_text_body_passed_through() {
        assert_eq!(
            extract_error_message("Internal Server Error", BAD_REQUEST),
            "Internal Server Error"
        );
    }

    #[test]
    fn empty_body_falls_back_to_status_text() {
        assert_eq!(
            extract_error_message("", StatusCode::SERVICE_UNAVAILABLE),
            "Service Unavailable"
        );
    }

    #[test]
    fn non_string_error_field_is_not_a_match() {
        // `error` holding an object without a nested string falls through
        // to `detail`.
        let body = r#"{"error": {"code": 13}, "detail": "fallback"}"#;
        assert_eq!(extract_error_message(body, BAD_REQUEST), "fallback");
    }

    #[test]
    fn promotion_field_omitted_when_absent() {
        let request = MoveRequest {
            from_row: 6,
            from_col: 4,
            to_row: 4,
            to_col: 4,
            promotion: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("promotion").is_none());
    }

    #[test]
    fn promotion_field_present_when_set() {
        let request = MoveRequest {
            from_row: 1,
            from_col: 3,
            to_row: 0,
            to_col: 3,
            promotion: Some(PromotionChoice::Rook),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["promotion"], "R");
    }
}
