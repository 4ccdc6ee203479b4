use tracing::{debug, info};

use crate::ai::Agent;
use crate::env::{Connect4Env, Observation, RewardConfig};
use crate::error::TrainingError;
use crate::game::{Connect4Engine, Player, Winner};
use crate::training::metrics::EpisodeResult;

/// A single step of experience, seen from the player who moved.
#[derive(Debug, Clone, PartialEq)]
pub struct Experience {
    pub observation: Observation,
    pub action: usize,
    pub reward: f32,
    pub next_observation: Observation,
    pub done: bool,
    pub player: Player,
}

/// Result of playing one episode.
pub struct EpisodeTrace {
    pub experiences: Vec<Experience>,
    pub result: EpisodeResult,
}

/// Play one episode in `env`. `first` moves for player 1, `second` for
/// player 2.
///
/// An invalid action ends the episode with the environment's penalty.
pub fn play_episode(
    env: &mut Connect4Env,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    exploration_rate: f32,
) -> EpisodeTrace {
    run_episode(env, |engine| match engine.current_player() {
        Player::One => first.select_action(engine, exploration_rate),
        Player::Two => second.select_action(engine, exploration_rate),
    })
}

/// Play one episode where `agent` plays both sides.
pub fn play_self_play_episode(
    env: &mut Connect4Env,
    agent: &mut dyn Agent,
    exploration_rate: f32,
) -> EpisodeTrace {
    run_episode(env, |engine| agent.select_action(engine, exploration_rate))
}

fn run_episode(
    env: &mut Connect4Env,
    mut choose: impl FnMut(&Connect4Engine) -> usize,
) -> EpisodeTrace {
    env.reset();
    let mut experiences = Vec::new();

    loop {
        let observation = env.observation();
        let action = choose(env.engine());
        let t = env.step(action);
        experiences.push(Experience {
            observation,
            action,
            reward: t.reward,
            next_observation: t.observation,
            done: t.done,
            player: t.mover,
        });
        if t.done {
            break;
        }
    }

    let winner = env.engine().winner();
    attribute_outcome(&mut experiences, winner, env.rewards());

    let result = EpisodeResult {
        winner,
        game_length: experiences.len(),
    };
    debug!(game_length = result.game_length, winner = ?result.winner, "episode finished");

    EpisodeTrace {
        experiences,
        result,
    }
}

/// Give the player who moved just before the final move their share of the
/// outcome: `loss` when the final move won, `draw` when it filled the board.
/// Their experience becomes terminal too.
pub fn attribute_outcome(
    experiences: &mut [Experience],
    winner: Option<Winner>,
    rewards: &RewardConfig,
) {
    let Some(winner) = winner else {
        return;
    };
    let n = experiences.len();
    if n < 2 {
        return;
    }
    let previous = &mut experiences[n - 2];
    previous.reward = rewards.terminal(winner, previous.player);
    previous.done = true;
}

/// Play one game between two agents on a bare engine.
pub fn play_match(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    agent_player: Player,
) -> Result<Winner, TrainingError> {
    let mut engine = Connect4Engine::new();

    loop {
        let mover: &mut dyn Agent = if engine.current_player() == agent_player {
            &mut *agent
        } else {
            &mut *opponent
        };
        let action = mover.select_action(&engine, 0.0);
        let result = engine.step(action);
        if !result.valid {
            return Err(TrainingError::IllegalAction {
                agent: mover.name().to_string(),
                action,
                legal: engine.valid_actions(),
            });
        }
        if let Some(winner) = result.winner {
            return Ok(winner);
        }
    }
}

/// Win/draw/loss counts from the evaluated agent's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalMetrics {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl EvalMetrics {
    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f32 {
        self.ratio(self.wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.ratio(self.draws)
    }

    pub fn loss_rate(&self) -> f32 {
        self.ratio(self.losses)
    }

    fn ratio(&self, count: usize) -> f32 {
        match self.games() {
            0 => 0.0,
            total => count as f32 / total as f32,
        }
    }

    pub fn record(&mut self, winner: Winner, agent_player: Player) {
        match winner {
            Winner::Draw => self.draws += 1,
            Winner::Player(p) if p == agent_player => self.wins += 1,
            Winner::Player(_) => self.losses += 1,
        }
    }
}

/// Evaluate `agent` against `opponent` over `games` games, alternating who
/// moves first.
pub fn evaluate(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    games: usize,
) -> Result<EvalMetrics, TrainingError> {
    let mut metrics = EvalMetrics::default();

    for game_idx in 0..games {
        let agent_player = if game_idx % 2 == 0 {
            Player::One
        } else {
            Player::Two
        };
        let winner = play_match(agent, opponent, agent_player)?;
        metrics.record(winner, agent_player);
    }

    info!(
        agent = agent.name(),
        opponent = opponent.name(),
        games,
        win_rate = metrics.win_rate(),
        draw_rate = metrics.draw_rate(),
        "evaluation finished"
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{PolicyAgent, RandomAgent, RuleBasedAgent};
    use crate::game::COLS;

    /// Plays a fixed column sequence, one entry per call.
    struct Scripted {
        moves: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        fn new(moves: &[usize]) -> Self {
            Scripted {
                moves: moves.to_vec(),
                next: 0,
            }
        }
    }

    impl Agent for Scripted {
        fn select_action(&mut self, _engine: &Connect4Engine, _exploration_rate: f32) -> usize {
            let col = self.moves[self.next];
            self.next += 1;
            col
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    #[test]
    fn test_self_play_episode_terminates() {
        let mut env = Connect4Env::default();
        let mut agent = RandomAgent::with_seed(5);
        let trace = play_self_play_episode(&mut env, &mut agent, 0.0);
        assert!(!trace.experiences.is_empty());
        assert!(trace.result.winner.is_some());
        assert_eq!(trace.result.game_length, trace.experiences.len());
        assert!(trace.experiences.last().unwrap().done);
    }

    #[test]
    fn test_loss_attributed_to_previous_mover() {
        let mut env = Connect4Env::default();
        // Player 1 stacks column 0, player 2 stacks column 1; player 1 wins on move 7.
        let mut first = Scripted::new(&[0, 0, 0, 0]);
        let mut second = Scripted::new(&[1, 1, 1]);
        let trace = play_episode(&mut env, &mut first, &mut second, 0.0);

        assert_eq!(trace.experiences.len(), 7);
        assert_eq!(trace.result.winner, Some(Winner::Player(Player::One)));

        let last = &trace.experiences[6];
        assert_eq!(last.player, Player::One);
        assert_eq!(last.reward, 1.0);
        assert!(last.done);

        let loser = &trace.experiences[5];
        assert_eq!(loser.player, Player::Two);
        assert_eq!(loser.reward, -1.0);
        assert!(loser.done);

        assert_eq!(trace.experiences[0].reward, 0.0);
        assert!(!trace.experiences[0].done);
    }

    #[test]
    fn test_draw_attributed_to_previous_mover() {
        let board = crate::game::Board::try_from_rows([
            [0, 2, 1, 2, 1, 2, 1],
            [1, 1, 1, 2, 1, 2, 1],
            [2, 1, 2, 1, 2, 1, 2],
            [1, 2, 1, 2, 1, 2, 1],
            [1, 2, 1, 2, 2, 2, 1],
            [1, 1, 2, 1, 2, 1, 2],
        ])
        .unwrap();
        let engine = Connect4Engine::from_board(board, Player::One).unwrap();
        let rewards = RewardConfig {
            draw: 0.25,
            ..RewardConfig::default()
        };
        let mut env = Connect4Env::with_engine(engine, rewards);

        // Player 2's move that left a single empty cell.
        let mut experiences = vec![Experience {
            observation: env.observation(),
            action: 1,
            reward: 0.0,
            next_observation: env.observation(),
            done: false,
            player: Player::Two,
        }];
        let observation = env.observation();
        let t = env.step(0);
        assert_eq!(t.winner, Some(Winner::Draw));
        experiences.push(Experience {
            observation,
            action: 0,
            reward: t.reward,
            next_observation: t.observation,
            done: t.done,
            player: t.mover,
        });

        attribute_outcome(&mut experiences, env.engine().winner(), env.rewards());

        assert_eq!(experiences[1].reward, 0.25);
        assert!(experiences[1].done);
        assert_eq!(experiences[0].player, Player::Two);
        assert_eq!(experiences[0].reward, 0.25);
        assert!(experiences[0].done);
    }

    #[test]
    fn test_invalid_action_ends_episode() {
        let mut env = Connect4Env::default();
        let mut first = Scripted::new(&[9]);
        let mut second = Scripted::new(&[]);
        let trace = play_episode(&mut env, &mut first, &mut second, 0.0);

        assert_eq!(trace.experiences.len(), 1);
        assert_eq!(trace.experiences[0].reward, -2.0);
        assert!(trace.experiences[0].done);
        assert_eq!(trace.result.winner, None);
    }

    #[test]
    fn test_play_match_reports_illegal_action() {
        let mut bad = PolicyAgent::with_seed(|_: &Observation| [0.0f32; COLS], "Zero", 0);
        let mut scripted = Scripted::new(&[8]);
        let err = play_match(&mut bad, &mut scripted, Player::One).unwrap_err();
        assert_eq!(
            err,
            TrainingError::IllegalAction {
                agent: "Scripted".to_string(),
                action: 8,
                legal: vec![0, 1, 2, 3, 4, 5, 6],
            }
        );
    }

    #[test]
    fn test_evaluate_counts_every_game() {
        let mut agent = RuleBasedAgent::with_seed(1);
        let mut opponent = RandomAgent::with_seed(2);
        let metrics = evaluate(&mut agent, &mut opponent, 20).unwrap();
        assert_eq!(metrics.games(), 20);
        let total = metrics.win_rate() + metrics.draw_rate() + metrics.loss_rate();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_eval_metrics_record() {
        let mut m = EvalMetrics::default();
        m.record(Winner::Player(Player::Two), Player::Two);
        m.record(Winner::Player(Player::One), Player::Two);
        m.record(Winner::Draw, Player::One);
        assert_eq!(
            m,
            EvalMetrics {
                wins: 1,
                draws: 1,
                losses: 1
            }
        );
        assert_eq!(EvalMetrics::default().win_rate(), 0.0);
    }
}
