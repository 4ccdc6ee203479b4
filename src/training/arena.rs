use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::Agent;
use crate::env::Connect4Env;
use crate::error::TrainingError;
use crate::game::Player;
use crate::training::episode::{evaluate, play_episode, EvalMetrics};
use crate::training::metrics::TrainingMetrics;

/// Arena configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Episodes played through the environment.
    pub games: usize,
    pub log_interval: usize,
    /// Greedy games played at the end, alternating sides.
    pub eval_games: usize,
    pub exploration_rate: f32,
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games: 1000,
            log_interval: 100,
            eval_games: 100,
            exploration_rate: 0.0,
            seed: None,
        }
    }
}

/// Summary of an arena run.
#[derive(Debug, Clone, Copy)]
pub struct ArenaReport {
    pub episodes: usize,
    pub first_win_rate: f32,
    pub second_win_rate: f32,
    pub draw_rate: f32,
    pub invalid_rate: f32,
    pub average_game_length: f32,
    pub eval: EvalMetrics,
}

/// Plays two agents against each other through a [`Connect4Env`].
pub struct Arena {
    config: ArenaConfig,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        Arena { config }
    }

    /// Run `games` episodes with `first` as player 1, logging rolling
    /// metrics, then evaluate `first` against `second` with sides alternating.
    pub fn run(
        &self,
        env: &mut Connect4Env,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<ArenaReport, TrainingError> {
        let games = self.config.games;
        let mut metrics = TrainingMetrics::with_capacity(games.max(1));
        let window = self.config.log_interval;

        info!(
            first = first.name(),
            second = second.name(),
            games,
            "starting arena"
        );

        for episode in 1..=games {
            let trace = play_episode(env, first, second, self.config.exploration_rate);
            metrics.record_episode(trace.result);

            if window > 0 && episode % window == 0 {
                info!(
                    episode,
                    games,
                    p1_win_rate = metrics.win_rate(Player::One, window),
                    p2_win_rate = metrics.win_rate(Player::Two, window),
                    draw_rate = metrics.draw_rate(window),
                    avg_len = metrics.average_game_length(window),
                    "progress"
                );
            }
        }

        let eval = evaluate(first, second, self.config.eval_games)?;

        Ok(ArenaReport {
            episodes: metrics.total_episodes(),
            first_win_rate: metrics.win_rate(Player::One, games),
            second_win_rate: metrics.win_rate(Player::Two, games),
            draw_rate: metrics.draw_rate(games),
            invalid_rate: metrics.invalid_rate(games),
            average_game_length: metrics.average_game_length(games),
            eval,
        })
    }
}
