use super::{Board, Player, Winner, COLS, ROWS};
use crate::error::EngineError;

/// Outcome of a single `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub valid: bool,
    pub done: bool,
    pub winner: Option<Winner>,
}

impl StepResult {
    fn rejected() -> Self {
        StepResult {
            valid: false,
            done: false,
            winner: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    InProgress,
    Terminal(Winner),
}

/// The authority on legal moves, turn order and terminal detection.
///
/// Each game session or training episode owns its own engine; nothing inside
/// is shared or locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4Engine {
    board: Board,
    current_player: Player,
    game_over: bool,
    winner: Option<Winner>,
    moves_left: usize,
}

impl Connect4Engine {
    pub fn new() -> Self {
        Connect4Engine {
            board: Board::new(),
            current_player: Player::One,
            game_over: false,
            winner: None,
            moves_left: ROWS * COLS,
        }
    }

    /// Engine positioned at an arbitrary board with `current_player` to move.
    ///
    /// The terminal status is derived from the board: a four-in-a-row ends the
    /// game for its owner, a full board without one is a draw. Boards with an
    /// empty cell under a piece are rejected.
    pub fn from_board(board: Board, current_player: Player) -> Result<Self, EngineError> {
        if let Some((row, col)) = board.floating_gap() {
            return Err(EngineError::FloatingPiece { row, col });
        }
        let one_won = board.check_win(Player::One);
        let two_won = board.check_win(Player::Two);
        let moves_left = board.empty_cells();

        let winner = match (one_won, two_won) {
            (true, true) => return Err(EngineError::BothPlayersWon),
            (true, false) => Some(Winner::Player(Player::One)),
            (false, true) => Some(Winner::Player(Player::Two)),
            (false, false) if moves_left == 0 => Some(Winner::Draw),
            (false, false) => None,
        };

        Ok(Connect4Engine {
            board,
            current_player,
            game_over: winner.is_some(),
            winner,
            moves_left,
        })
    }

    /// Reset the game to the initial state.
    pub fn reset(&mut self) {
        *self = Connect4Engine::new();
    }

    /// Apply a move for the current player.
    ///
    /// Out-of-range and full columns come back as `valid == false` and leave
    /// the engine untouched. Once the game is over every call echoes the
    /// stored winner.
    pub fn step(&mut self, column: usize) -> StepResult {
        if self.game_over {
            return StepResult {
                valid: false,
                done: true,
                winner: self.winner,
            };
        }

        if self.board.is_column_full(column) {
            return StepResult::rejected();
        }

        let player = self.current_player;
        let Ok(_row) = self.board.drop_piece(column, player.to_cell()) else {
            unreachable!("column {column} reported valid but has no landing row");
        };
        self.moves_left -= 1;

        if Self::check_win(&self.board, player) {
            self.finish(Winner::Player(player));
        } else if self.moves_left == 0 {
            self.finish(Winner::Draw);
        } else {
            self.current_player = player.other();
        }

        StepResult {
            valid: true,
            done: self.game_over,
            winner: self.winner,
        }
    }

    fn finish(&mut self, winner: Winner) {
        self.game_over = true;
        self.winner = Some(winner);
    }

    /// Columns where a move is possible on the live board.
    pub fn valid_actions(&self) -> Vec<usize> {
        self.board.valid_actions()
    }

    /// Columns where a move is possible on a supplied board.
    pub fn valid_actions_for(board: &Board) -> Vec<usize> {
        board.valid_actions()
    }

    /// Whether `player` has four in a row anywhere on `board`.
    pub fn check_win(board: &Board, player: Player) -> bool {
        board.check_win(player)
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn moves_left(&self) -> usize {
        self.moves_left
    }

    pub fn state(&self) -> EngineState {
        match self.winner {
            Some(winner) if self.game_over => EngineState::Terminal(winner),
            _ => EngineState::InProgress,
        }
    }
}

impl Default for Connect4Engine {
    fn default() -> Self {
        Self::new()
    }
}
