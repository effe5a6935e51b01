use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::{ErrorKind, GameError};
use crate::leaderboard::PageError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    InvalidRequest(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    /// Plain message, kept for clients that only read `detail`.
    detail: String,
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    kind: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, kind, message) = match self {
            ApiError::Game(err) => {
                let status = match err.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::InvalidState | ErrorKind::Validation | ErrorKind::Conflict => {
                        StatusCode::BAD_REQUEST
                    }
                };
                (status, err.code(), err.kind().as_str(), err.to_string())
            }
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                ErrorKind::Validation.as_str(),
                msg,
            ),
        };

        let body = ErrorResponse {
            detail: message.clone(),
            error: ErrorDetail {
                code: code.to_string(),
                kind: kind.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;
    use http_body_util::BodyExt;

    async fn error_to_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn game_not_found_returns_404() {
        let (status, json) = error_to_json(GameError::NotFound("game-1".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "GAME_NOT_FOUND");
        assert_eq!(json["error"]["kind"], "not_found");
        assert_eq!(json["detail"], "Game not found");
    }

    #[tokio::test]
    async fn invalid_state_returns_400() {
        let (status, json) = error_to_json(GameError::ActiveGameCannotDelete.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "ACTIVE_GAME_CANNOT_DELETE");
        assert_eq!(json["error"]["kind"], "invalid_state");
        assert_eq!(json["error"]["message"], "Cannot delete an active game");
    }

    #[tokio::test]
    async fn conflict_returns_400() {
        let err = GameError::CellOccupied(Cell { row: 0, col: 0 });
        let (status, json) = error_to_json(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["kind"], "conflict");
        assert_eq!(json["detail"], "Cell is already occupied");
    }

    #[tokio::test]
    async fn page_error_is_invalid_request() {
        let (status, json) = error_to_json(PageError::InvalidPage.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
        assert_eq!(json["error"]["kind"], "validation");
    }
}
