use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::{Board, Connect4Engine, Player};

/// Heuristic opponent: take an immediate win, otherwise block the opponent's
/// immediate win, otherwise play a random legal column.
pub struct RuleBasedAgent {
    rng: StdRng,
}

impl RuleBasedAgent {
    pub fn new() -> Self {
        RuleBasedAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RuleBasedAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// First column in `actions` where `player` would complete four in a row.
    pub fn winning_move(board: &Board, actions: &[usize], player: Player) -> Option<usize> {
        actions.iter().copied().find(|&col| {
            board
                .with_piece(col, player.to_cell())
                .is_some_and(|next| Connect4Engine::check_win(&next, player))
        })
    }
}

impl Default for RuleBasedAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RuleBasedAgent {
    fn select_action(&mut self, engine: &Connect4Engine, _exploration_rate: f32) -> usize {
        let me = engine.current_player();
        let board = engine.board();
        let actions = engine.valid_actions();

        Self::winning_move(&board, &actions, me)
            .or_else(|| Self::winning_move(&board, &actions, me.other()))
            .or_else(|| actions.choose(&mut self.rng).copied())
            .expect("no legal actions available")
    }

    fn name(&self) -> &str {
        "RuleBased"
    }
}
