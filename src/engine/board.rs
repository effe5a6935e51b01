//! The 3×3 board and line detection.
//!
//! Cells hold the identifier of the player who marked them. The board never
//! validates turn order; that is the job of [`Game`](crate::engine::Game).

use crate::engine::types::{BOARD_SIZE, Cell, GameError, MoveRecord};

/// The eight win lines as `(row, col)` triples: 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<String>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board by applying a move list to an empty board.
    ///
    /// A list that marks the same cell twice is rejected with `CellOccupied`.
    pub fn replay<'a>(
        moves: impl IntoIterator<Item = &'a MoveRecord>,
    ) -> Result<Self, GameError> {
        let mut board = Board::new();
        for mv in moves {
            if board.is_occupied(mv.cell) {
                return Err(GameError::CellOccupied(mv.cell));
            }
            board.place(mv.cell, &mv.player_id);
        }
        Ok(board)
    }

    /// Player id at `cell`, if marked.
    pub fn get(&self, cell: Cell) -> Option<&str> {
        self.cells[cell.row][cell.col].as_deref()
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells[cell.row][cell.col].is_some()
    }

    /// Mark `cell` for `player_id`. Callers check occupancy first.
    pub(crate) fn place(&mut self, cell: Cell, player_id: &str) {
        debug_assert!(!self.is_occupied(cell), "cell {cell} already occupied");
        self.cells[cell.row][cell.col] = Some(player_id.to_string());
    }

    /// Whether `player_id` holds every cell of some win line.
    pub fn has_line(&self, player_id: &str) -> bool {
        WIN_LINES.iter().any(|line| {
            line.iter()
                .all(|&(row, col)| self.cells[row][col].as_deref() == Some(player_id))
        })
    }

    /// The owner of the first complete win line, scanning rows, columns, then diagonals.
    pub fn winner(&self) -> Option<&str> {
        WIN_LINES.iter().find_map(|[a, b, c]| {
            let first = self.cells[a.0][a.1].as_deref()?;
            let same =
                |&(row, col): &(usize, usize)| self.cells[row][col].as_deref() == Some(first);
            (same(b) && same(c)).then_some(first)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Unmarked cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::all().filter(|&cell| !self.is_occupied(cell)).collect()
    }

    /// Number of marked cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Row-major nested representation used by API responses.
    pub fn to_rows(&self) -> Vec<Vec<Option<String>>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }
}

// =========================================================================
// Tests
// =========================================================================
