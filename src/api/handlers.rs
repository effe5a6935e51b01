use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::{debug, info};

use crate::engine::{Game, GameError, GameStatus};
use crate::leaderboard::{self, LeaderboardKind, PageRequest};

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        games: state.games.count().await,
        uptime,
    })
}

// =========================================================================
// Create Game
// =========================================================================

/// POST /games/
pub async fn create_game(
    State(state): State<SharedState>,
    Json(input): Json<CreateGameRequest>,
) -> Result<Json<GameMessageResponse>, ApiError> {
    // An empty name falls back to the generated id.
    let name = input.name.filter(|n| !n.is_empty());
    let max = state.config.max_name_length;
    if name.as_ref().is_some_and(|n| n.chars().count() > max) {
        return Err(GameError::NameTooLong { max }.into());
    }

    let game = state.games.create(name).await;

    Ok(Json(GameMessageResponse {
        game: game_to_response(&game),
        message: "Game created successfully".to_string(),
    }))
}

// =========================================================================
// List Games
// =========================================================================

/// GET /games/
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<ListGamesQuery>,
) -> Json<ListGamesResponse> {
    let games = match query.status.as_deref().filter(|s| !s.is_empty()) {
        None => state.games.list(None).await,
        Some(raw) => match GameStatus::parse(raw) {
            Some(status) => state.games.list(Some(status)).await,
            // No game can carry an unknown status.
            None => Vec::new(),
        },
    };

    let games: Vec<GameResponse> = games.iter().map(game_to_response).collect();
    Json(ListGamesResponse {
        count: games.len(),
        games,
    })
}

// =========================================================================
// Get Game
// =========================================================================

/// GET /games/{id}
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameEnvelope>, ApiError> {
    let game = state.games.get(&id).await?;
    Ok(Json(GameEnvelope {
        game: game_to_response(&game),
    }))
}

/// GET /games/{id}/status
pub async fn get_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameStatusResponse>, ApiError> {
    let game = state.games.get(&id).await?;
    Ok(Json(GameStatusResponse {
        status: game_to_status_view(&game),
    }))
}

// =========================================================================
// Delete Game
// =========================================================================

/// DELETE /games/{id}
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.games.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Game deleted successfully".to_string(),
    }))
}

// =========================================================================
// Join Game
// =========================================================================

/// POST /games/{id}/join
pub async fn join_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<JoinGameRequest>,
) -> Result<Json<GameMessageResponse>, ApiError> {
    let player_id = input.player_id;
    let joining = player_id.clone();
    let game = state
        .games
        .update(&id, Box::new(move |g: &mut Game| g.join(&joining)))
        .await?;

    info!(game_id = %id, player_id = %player_id, status = %game.status(), "player joined");

    Ok(Json(GameMessageResponse {
        game: game_to_response(&game),
        message: "Successfully joined game".to_string(),
    }))
}

// =========================================================================
// Make Move
// =========================================================================

/// POST /games/{id}/moves
pub async fn make_move(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(input): Json<MakeMoveRequest>,
) -> Result<Json<MoveMadeResponse>, ApiError> {
    let MakeMoveRequest {
        player_id,
        row,
        col,
    } = input;
    let (game, made_move) = state.games.play_move(&id, &player_id, row, col).await?;

    info!(game_id = %id, player_id = %player_id, row, col, "move made");
    if let Some(winner) = game.winner_id() {
        info!(game_id = %id, winner, "game won");
    } else if game.is_draw() {
        info!(game_id = %id, "game drawn");
    }

    Ok(Json(MoveMadeResponse {
        game: game_to_response(&game),
        made_move: move_to_response(&made_move),
        message: "Move made successfully".to_string(),
    }))
}

// =========================================================================
// Valid Moves
// =========================================================================

/// GET /games/{id}/moves
pub async fn valid_moves(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ValidMovesResponse>, ApiError> {
    let game = state.games.get(&id).await?;
    let cells = game.valid_moves()?;

    let valid_moves: Vec<CellResponse> = cells.into_iter().map(cell_to_response).collect();
    Ok(Json(ValidMovesResponse {
        count: valid_moves.len(),
        valid_moves,
    }))
}

// =========================================================================
// Leaderboard
// =========================================================================

/// GET /leaderboard/
pub async fn leaderboard_wins(
    State(state): State<SharedState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    leaderboard_page(&state, query, LeaderboardKind::Wins)
}

/// GET /leaderboard/efficiency
pub async fn leaderboard_efficiency(
    State(state): State<SharedState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    leaderboard_page(&state, query, LeaderboardKind::Efficiency)
}

fn leaderboard_page(
    state: &SharedState,
    query: LeaderboardQuery,
    kind: LeaderboardKind,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let page = PageRequest::new(
        query.page,
        query.limit,
        state.config.leaderboard_default_limit,
        state.config.leaderboard_max_limit,
    )?;
    debug!(?kind, page = page.page, limit = page.limit, "leaderboard requested");

    Ok(Json(LeaderboardResponse {
        leaderboard: leaderboard::query(kind, page),
        kind,
    }))
}

// =========================================================================
// Tests
// =========================================================================
