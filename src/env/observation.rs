use crate::game::{Board, Cell, Player, COLS, ROWS};

/// Number of planes in an observation.
pub const PLANES: usize = 2;
/// Flat length of an observation.
pub const OBSERVATION_LEN: usize = PLANES * ROWS * COLS;

/// Board seen from the side to move.
///
/// Plane 0: pieces of the player about to move (1.0 where placed)
/// Plane 1: opponent's pieces (1.0 where placed)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    planes: [[[f32; COLS]; ROWS]; PLANES],
}

impl Observation {
    pub fn from_board(board: &Board, to_move: Player) -> Self {
        let mine = to_move.to_cell();
        let mut planes = [[[0.0f32; COLS]; ROWS]; PLANES];
        for row in 0..ROWS {
            for col in 0..COLS {
                match board.get(row, col) {
                    Cell::Empty => {}
                    cell if cell == mine => planes[0][row][col] = 1.0,
                    _ => planes[1][row][col] = 1.0,
                }
            }
        }
        Observation { planes }
    }

    pub fn planes(&self) -> &[[[f32; COLS]; ROWS]; PLANES] {
        &self.planes
    }

    /// Value at `(plane, row, col)`.
    pub fn get(&self, plane: usize, row: usize, col: usize) -> f32 {
        self.planes[plane][row][col]
    }

    /// Row-major `[plane][row][col]` flattening.
    pub fn as_flat(&self) -> [f32; OBSERVATION_LEN] {
        let mut data = [0.0f32; OBSERVATION_LEN];
        for (plane, rows) in self.planes.iter().enumerate() {
            for (row, cols) in rows.iter().enumerate() {
                let offset = plane * ROWS * COLS + row * COLS;
                data[offset..offset + COLS].copy_from_slice(cols);
            }
        }
        data
    }

    /// Legal columns, recovered from the planes alone: a column is open while
    /// its top cell is empty in both planes.
    pub fn valid_actions(&self) -> Vec<usize> {
        (0..COLS)
            .filter(|&col| self.planes[0][0][col] + self.planes[1][0][col] == 0.0)
            .collect()
    }
}
