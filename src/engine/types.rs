use std::fmt;

use chrono::{DateTime, Utc};

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Maximum number of players in one game.
pub const MAX_PLAYERS: usize = 2;

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Lifecycle stage of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Created, fewer than two players joined.
    Waiting,
    /// Two players joined, moves accepted.
    Active,
    /// Won or drawn. Terminal.
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Active => "active",
            GameStatus::Completed => "completed",
        }
    }

    /// Parse the exact lowercase wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(GameStatus::Waiting),
            "active" => Some(GameStatus::Active),
            "completed" => Some(GameStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A board coordinate known to be in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Construct a cell from raw request coordinates.
    ///
    /// Returns `None` when either coordinate falls outside `0..BOARD_SIZE`.
    pub fn checked(row: i64, col: i64) -> Option<Self> {
        let in_range = |v: i64| (0..BOARD_SIZE as i64).contains(&v);
        if in_range(row) && in_range(col) {
            Some(Cell {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell { row, col }))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A participant in a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    /// A player whose display name is its identifier.
    pub fn named_by_id(id: &str) -> Self {
        Player {
            id: id.to_string(),
            name: id.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// MoveRecord
// ---------------------------------------------------------------------------

/// A recorded placement. Immutable once appended to a game's history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// `m-<n>`, unique within the game.
    pub id: String,
    pub game_id: String,
    pub player_id: String,
    pub cell: Cell,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// GameError
// ---------------------------------------------------------------------------

/// Broad category of a failure, independent of transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced game absent.
    NotFound,
    /// Action not permitted in the game's current status.
    InvalidState,
    /// Malformed input.
    Validation,
    /// Input valid but clashes with the current board or turn.
    Conflict,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
        }
    }
}

/// Domain errors for the game state machine and store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Game not found")]
    NotFound(String),

    #[error("Game is not accepting new players")]
    NotAcceptingPlayers,

    #[error("Game is full")]
    GameFull,

    #[error("Player already in the game")]
    DuplicatePlayer(String),

    #[error("Game is not active")]
    NotActive,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Move coordinates must be between 0 and 2")]
    OutOfBounds { row: i64, col: i64 },

    #[error("Cell is already occupied")]
    CellOccupied(Cell),

    #[error("Cannot delete an active game")]
    ActiveGameCannotDelete,

    #[error("Game name must be at most {max} characters")]
    NameTooLong { max: usize },
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotFound(_) => ErrorKind::NotFound,
            GameError::NotAcceptingPlayers
            | GameError::GameFull
            | GameError::NotActive
            | GameError::ActiveGameCannotDelete => ErrorKind::InvalidState,
            GameError::DuplicatePlayer(_)
            | GameError::OutOfBounds { .. }
            | GameError::NameTooLong { .. } => ErrorKind::Validation,
            GameError::NotYourTurn | GameError::CellOccupied(_) => ErrorKind::Conflict,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "GAME_NOT_FOUND",
            GameError::NotAcceptingPlayers => "NOT_ACCEPTING_PLAYERS",
            GameError::GameFull => "GAME_FULL",
            GameError::DuplicatePlayer(_) => "DUPLICATE_PLAYER",
            GameError::NotActive => "NOT_ACTIVE",
            GameError::NotYourTurn => "NOT_YOUR_TURN",
            GameError::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            GameError::CellOccupied(_) => "CELL_OCCUPIED",
            GameError::ActiveGameCannotDelete => "ACTIVE_GAME_CANNOT_DELETE",
            GameError::NameTooLong { .. } => "NAME_TOO_LONG",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
