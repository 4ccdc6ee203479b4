//! Core Connect Four game logic: board representation, player types, and the
//! engine that owns turn order and terminal detection.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, MoveError, COLS, CONNECT, ROWS};
pub use engine::{Connect4Engine, EngineState, StepResult};
pub use player::{Player, Winner};
