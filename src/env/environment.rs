use tracing::debug;

use super::{Observation, RewardConfig, PLANES};
use crate::game::{Connect4Engine, Player, Winner, COLS, ROWS};

/// Result of one environment step, from the mover's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation for whoever moves next.
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub valid: bool,
    pub winner: Option<Winner>,
    /// Player who submitted the action.
    pub mover: Player,
}

/// Single-episode environment around one exclusively owned engine.
#[derive(Debug, Clone)]
pub struct Connect4Env {
    engine: Connect4Engine,
    rewards: RewardConfig,
}

impl Connect4Env {
    pub fn new(rewards: RewardConfig) -> Self {
        Connect4Env {
            engine: Connect4Engine::new(),
            rewards,
        }
    }

    /// Environment starting from an already positioned engine.
    pub fn with_engine(engine: Connect4Engine, rewards: RewardConfig) -> Self {
        Connect4Env { engine, rewards }
    }

    pub fn state_shape(&self) -> (usize, usize, usize) {
        (PLANES, ROWS, COLS)
    }

    pub fn actions_num(&self) -> usize {
        COLS
    }

    pub fn reset(&mut self) -> Observation {
        self.engine.reset();
        self.observation()
    }

    /// Apply `action` for the player to move.
    ///
    /// An illegal action ends the episode with the invalid-move penalty; the
    /// engine itself is left as it was.
    pub fn step(&mut self, action: usize) -> Transition {
        let mover = self.engine.current_player();
        let result = self.engine.step(action);

        let reward = if !result.valid {
            debug!(action, mover = mover.name(), "rejected action");
            self.rewards.invalid_move
        } else {
            match result.winner {
                Some(winner) => self.rewards.terminal(winner, mover),
                None => self.rewards.step,
            }
        };

        Transition {
            observation: self.observation(),
            reward,
            done: !result.valid || result.done,
            valid: result.valid,
            winner: result.winner,
            mover,
        }
    }

    /// Current board from the perspective of the player to move.
    pub fn observation(&self) -> Observation {
        Observation::from_board(&self.engine.board(), self.engine.current_player())
    }

    pub fn engine(&self) -> &Connect4Engine {
        &self.engine
    }

    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }
}

impl Default for Connect4Env {
    fn default() -> Self {
        Self::new(RewardConfig::default())
    }
}
