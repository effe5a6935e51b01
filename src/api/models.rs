use serde::{Deserialize, Serialize};

use crate::engine::{Cell, Game, MoveRecord, Player};
use crate::leaderboard::{LeaderboardEntry, LeaderboardKind};

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub player_id: String,
}

/// Coordinates are taken as wide signed integers so that out-of-range
/// values reach the state machine instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeMoveRequest {
    pub player_id: String,
    pub row: i64,
    pub col: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub games: usize,
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: String,
    pub name: String,
    pub status: String,
    pub board: Vec<Vec<Option<String>>>,
    pub players: Vec<PlayerResponse>,
    pub current_player_id: Option<String>,
    pub winner_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub moves: Vec<MoveResponse>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub id: String,
    pub game_id: String,
    pub player_id: String,
    pub row: usize,
    pub col: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnvelope {
    pub game: GameResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMessageResponse {
    pub game: GameResponse,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMadeResponse {
    pub game: GameResponse,
    #[serde(rename = "move")]
    pub made_move: MoveResponse,
    pub message: String,
}

/// Compact game view served by `/games/{id}/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusView {
    pub id: String,
    pub status: String,
    pub board: Vec<Vec<Option<String>>>,
    pub current_player_id: Option<String>,
    pub winner_id: Option<String>,
    pub players: Vec<PlayerResponse>,
    pub moves: Vec<MoveResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusResponse {
    pub status: GameStatusView,
}

#[derive(Debug, Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct CellResponse {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMovesResponse {
    pub valid_moves: Vec<CellResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGamesResponse {
    pub games: Vec<GameResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(rename = "type")]
    pub kind: LeaderboardKind,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn player_to_response(player: &Player) -> PlayerResponse {
    PlayerResponse {
        id: player.id.clone(),
        name: player.name.clone(),
    }
}

pub fn move_to_response(mv: &MoveRecord) -> MoveResponse {
    MoveResponse {
        id: mv.id.clone(),
        game_id: mv.game_id.clone(),
        player_id: mv.player_id.clone(),
        row: mv.cell.row,
        col: mv.cell.col,
        timestamp: mv.timestamp.to_rfc3339(),
    }
}

pub fn cell_to_response(cell: Cell) -> CellResponse {
    CellResponse {
        row: cell.row,
        col: cell.col,
    }
}

/// Convert an internal Game to the full API GameResponse.
pub fn game_to_response(game: &Game) -> GameResponse {
    GameResponse {
        id: game.id().to_string(),
        name: game.name.clone(),
        status: game.status().as_str().to_string(),
        board: game.board().to_rows(),
        players: game.players().iter().map(player_to_response).collect(),
        current_player_id: game.current_player_id().map(str::to_string),
        winner_id: game.winner_id().map(str::to_string),
        created_at: game.created_at().to_rfc3339(),
        updated_at: game.updated_at().to_rfc3339(),
        moves: game.moves().iter().map(move_to_response).collect(),
    }
}

pub fn game_to_status_view(game: &Game) -> GameStatusView {
    GameStatusView {
        id: game.id().to_string(),
        status: game.status().as_str().to_string(),
        board: game.board().to_rows(),
        current_player_id: game.current_player_id().map(str::to_string),
        winner_id: game.winner_id().map(str::to_string),
        players: game.players().iter().map(player_to_response).collect(),
        moves: game.moves().iter().map(move_to_response).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_response_uses_camel_case_and_nulls() {
        let game = Game::new("game-1", None);
        let json = serde_json::to_value(game_to_response(&game)).unwrap();
        assert_eq!(json["id"], "game-1");
        assert_eq!(json["name"], "game-1");
        assert_eq!(json["status"], "waiting");
        assert!(json["currentPlayerId"].is_null());
        assert!(json["winnerId"].is_null());
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        assert_eq!(json["board"].as_array().unwrap().len(), 3);
        assert!(json["board"][1][1].is_null());
        assert!(json["moves"].as_array().unwrap().is_empty());
    }

    #[test]
    fn move_response_field_names() {
        let mut game = Game::new("game-1", None);
        game.join("a").unwrap();
        game.join("b").unwrap();
        let mv = game.make_move("a", 1, 2).unwrap().clone();
        let json = serde_json::to_value(move_to_response(&mv)).unwrap();
        assert_eq!(json["id"], "m-1");
        assert_eq!(json["gameId"], "game-1");
        assert_eq!(json["playerId"], "a");
        assert_eq!(json["row"], 1);
        assert_eq!(json["col"], 2);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn status_view_omits_metadata() {
        let game = Game::new("game-3", Some("named".into()));
        let json = serde_json::to_value(game_to_status_view(&game)).unwrap();
        assert_eq!(json["id"], "game-3");
        assert!(json.get("name").is_none());
        assert!(json.get("createdAt").is_none());
        assert!(json["players"].as_array().unwrap().is_empty());
    }
}
