//! Stateful game record and its transition rules.
//!
//! `Game` owns the board, players and move history and enforces the status
//! lifecycle `waiting → active → completed`. Every operation validates first
//! and mutates only after all checks pass, so a rejected action leaves the
//! record untouched.

use chrono::{DateTime, Utc};

use crate::engine::board::Board;
use crate::engine::types::{Cell, GameError, GameStatus, MAX_PLAYERS, MoveRecord, Player};

/// One tic-tac-toe match.
#[derive(Clone, Debug)]
pub struct Game {
    // Core state
    board: Board,
    players: Vec<Player>,
    moves: Vec<MoveRecord>,
    status: GameStatus,
    current_player_id: Option<String>,
    winner_id: Option<String>,

    // Metadata
    id: String,
    pub name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// A fresh game in `waiting` status. The name defaults to the id.
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        let id = id.into();
        let now = Utc::now();
        Self {
            board: Board::new(),
            players: Vec::with_capacity(MAX_PLAYERS),
            moves: Vec::new(),
            status: GameStatus::Waiting,
            current_player_id: None,
            winner_id: None,
            name: name.unwrap_or_else(|| id.clone()),
            id,
            created_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Recorded moves, oldest first.
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn current_player_id(&self) -> Option<&str> {
        self.current_player_id.as_deref()
    }

    pub fn winner_id(&self) -> Option<&str> {
        self.winner_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Completed with no winner.
    pub fn is_draw(&self) -> bool {
        self.status == GameStatus::Completed && self.winner_id.is_none()
    }

    // -----------------------------------------------------------------
    // Join
    // -----------------------------------------------------------------

    /// Add `player_id` to the game. The second join activates it with the
    /// first joiner to move.
    pub fn join(&mut self, player_id: &str) -> Result<(), GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::NotAcceptingPlayers);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::GameFull);
        }
        if self.players.iter().any(|p| p.id == player_id) {
            return Err(GameError::DuplicatePlayer(player_id.to_string()));
        }

        self.players.push(Player::named_by_id(player_id));
        if self.players.len() == MAX_PLAYERS {
            self.status = GameStatus::Active;
            self.current_player_id = Some(self.players[0].id.clone());
        }
        self.touch();
        Ok(())
    }

    // -----------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------

    /// Place `player_id`'s mark at `(row, col)` and resolve the outcome.
    ///
    /// Checks run in a fixed order: status, turn, bounds, occupancy. After
    /// the mark is placed the game completes on a win line or a full board;
    /// otherwise the turn passes to the other player.
    pub fn make_move(
        &mut self,
        player_id: &str,
        row: i64,
        col: i64,
    ) -> Result<&MoveRecord, GameError> {
        if self.status != GameStatus::Active {
            return Err(GameError::NotActive);
        }
        if self.current_player_id.as_deref() != Some(player_id) {
            return Err(GameError::NotYourTurn);
        }
        let cell = Cell::checked(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        if self.board.is_occupied(cell) {
            return Err(GameError::CellOccupied(cell));
        }

        let now = Utc::now();
        self.board.place(cell, player_id);
        self.moves.push(MoveRecord {
            id: format!("m-{}", self.moves.len() + 1),
            game_id: self.id.clone(),
            player_id: player_id.to_string(),
            cell,
            timestamp: now,
        });
        self.updated_at = now;

        if self.board.has_line(player_id) {
            self.status = GameStatus::Completed;
            self.winner_id = Some(player_id.to_string());
        } else if self.board.is_full() {
            self.status = GameStatus::Completed;
        } else {
            self.current_player_id = self.opponent_of(player_id).map(|p| p.id.clone());
        }

        // Just pushed above.
        Ok(&self.moves[self.moves.len() - 1])
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Empty cells in row-major order. Only meaningful while active.
    pub fn valid_moves(&self) -> Result<Vec<Cell>, GameError> {
        if self.status != GameStatus::Active {
            return Err(GameError::NotActive);
        }
        Ok(self.board.empty_cells())
    }

    /// Active games cannot be removed.
    pub fn ensure_deletable(&self) -> Result<(), GameError> {
        if self.status == GameStatus::Active {
            return Err(GameError::ActiveGameCannotDelete);
        }
        Ok(())
    }

    fn opponent_of(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id != player_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =========================================================================
// Tests
// =========================================================================
