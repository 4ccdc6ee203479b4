use serde::{Deserialize, Serialize};

use crate::game::{Player, Winner};

/// Scalar rewards handed to the player who just moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub win: f32,
    pub draw: f32,
    /// Given to a player whose move is answered by a winning move.
    pub loss: f32,
    /// Terminal penalty for choosing a full or out-of-range column.
    pub invalid_move: f32,
    /// Reward for an ordinary non-terminal move.
    pub step: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            win: 1.0,
            draw: 0.0,
            loss: -1.0,
            invalid_move: -2.0,
            step: 0.0,
        }
    }
}

impl RewardConfig {
    /// Reward for `mover` once the game has ended with `winner`.
    pub fn terminal(&self, winner: Winner, mover: Player) -> f32 {
        match winner {
            Winner::Draw => self.draw,
            Winner::Player(p) if p == mover => self.win,
            Winner::Player(_) => self.loss,
        }
    }
}
