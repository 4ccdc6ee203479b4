use std::fmt;

use super::Player;
use crate::error::EngineError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Run length needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// Numeric wire id: 0 empty, 1 first player, 2 second player.
    pub fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Cell> {
        match id {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Player1),
            2 => Some(Cell::Player2),
            _ => None,
        }
    }
}

/// A 6x7 grid. Row 0 is the top, row 5 the bottom; pieces stack bottom-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from numeric rows (0 empty, 1 and 2 for the players).
    ///
    /// Gravity is not checked: callers probing hypothetical positions may hand
    /// in anything, the engine only ever produces stacked boards.
    pub fn try_from_rows(rows: [[u8; COLS]; ROWS]) -> Result<Self, EngineError> {
        let mut board = Board::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                board.cells[row][col] =
                    Cell::from_id(value).ok_or(EngineError::InvalidCell { row, col, value })?;
            }
        }
        Ok(board)
    }

    /// Numeric form of the board, as sent over the wire.
    pub fn to_rows(&self) -> [[u8; COLS]; ROWS] {
        let mut rows = [[0u8; COLS]; ROWS];
        for row in 0..ROWS {
            for col in 0..COLS {
                rows[row][col] = self.cells[row][col].id();
            }
        }
        rows
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns whose top cell is empty, ascending.
    pub fn valid_actions(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Lowest empty row in a column (where a piece would land).
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull)?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Copy of this board with `cell` dropped into `col`, or `None` if the
    /// column cannot take it.
    pub fn with_piece(&self, col: usize, cell: Cell) -> Option<Board> {
        let mut next = *self;
        next.drop_piece(col, cell).ok()?;
        Some(next)
    }

    /// First empty cell, scanning columns left to right, that has a piece
    /// somewhere above it.
    pub fn floating_gap(&self) -> Option<(usize, usize)> {
        (0..COLS).find_map(|col| {
            let top = (0..ROWS).find(|&row| self.cells[row][col] != Cell::Empty)?;
            (top + 1..ROWS)
                .find(|&row| self.cells[row][col] == Cell::Empty)
                .map(|row| (row, col))
        })
    }

    pub fn empty_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Empty)
            .count()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Scan the whole grid for four of `player`'s pieces in a row.
    pub fn check_win(&self, player: Player) -> bool {
        let cell = player.to_cell();
        self.check_horizontal(cell)
            || self.check_vertical(cell)
            || self.check_diagonal_down(cell)
            || self.check_diagonal_up(cell)
    }

    fn check_horizontal(&self, cell: Cell) -> bool {
        (0..ROWS).any(|row| {
            (0..=COLS - CONNECT)
                .any(|col| (0..CONNECT).all(|i| self.cells[row][col + i] == cell))
        })
    }

    fn check_vertical(&self, cell: Cell) -> bool {
        (0..=ROWS - CONNECT).any(|row| {
            (0..COLS).any(|col| (0..CONNECT).all(|i| self.cells[row + i][col] == cell))
        })
    }

    /// Top-left to bottom-right, \
    fn check_diagonal_down(&self, cell: Cell) -> bool {
        (0..=ROWS - CONNECT).any(|row| {
            (0..=COLS - CONNECT)
                .any(|col| (0..CONNECT).all(|i| self.cells[row + i][col + i] == cell))
        })
    }

    /// Bottom-left to top-right, /
    fn check_diagonal_up(&self, cell: Cell) -> bool {
        (CONNECT - 1..ROWS).any(|row| {
            (0..=COLS - CONNECT)
                .any(|col| (0..CONNECT).all(|i| self.cells[row - i][col + i] == cell))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: String = (0..COLS).map(|col| format!(" {col}")).collect();
        writeln!(f, "{header}")?;
        writeln!(f, "{}", "-".repeat(header.len() + 1))?;
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => "| ",
                    Cell::Player1 => "|X",
                    Cell::Player2 => "|O",
                })
                .collect();
            writeln!(f, "{line}|")?;
        }
        write!(f, "{}", "-".repeat(header.len() + 1))
    }
}
