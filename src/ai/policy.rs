use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::agent::Agent;
use crate::env::Observation;
use crate::game::{Connect4Engine, COLS};

/// Opaque action-value source, e.g. a trained network.
///
/// Implementations see only the perspective-relative observation and may
/// score illegal columns arbitrarily; masking happens in [`PolicyAgent`].
pub trait Policy {
    fn action_values(&mut self, observation: &Observation) -> [f32; COLS];
}

impl<F> Policy for F
where
    F: FnMut(&Observation) -> [f32; COLS],
{
    fn action_values(&mut self, observation: &Observation) -> [f32; COLS] {
        self(observation)
    }
}

/// Epsilon-greedy agent around a [`Policy`] with illegal-action masking.
pub struct PolicyAgent<P> {
    policy: P,
    name: String,
    rng: StdRng,
}

impl<P: Policy> PolicyAgent<P> {
    pub fn new(policy: P, name: impl Into<String>) -> Self {
        PolicyAgent {
            policy,
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(policy: P, name: impl Into<String>, seed: u64) -> Self {
        PolicyAgent {
            policy,
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

/// Highest-valued legal column; ties go to the lowest index. NaN values never
/// win.
pub fn masked_argmax(values: &[f32; COLS], legal: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for &col in legal {
        let v = values[col];
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, best_v)) if best_v >= v => {}
            _ => best = Some((col, v)),
        }
    }
    best.map(|(col, _)| col).or_else(|| legal.first().copied())
}

impl<P: Policy> Agent for PolicyAgent<P> {
    fn select_action(&mut self, engine: &Connect4Engine, exploration_rate: f32) -> usize {
        let legal = engine.valid_actions();
        assert!(!legal.is_empty(), "No legal actions available");

        if exploration_rate > 0.0 && self.rng.random::<f32>() < exploration_rate {
            if let Some(&col) = legal.choose(&mut self.rng) {
                return col;
            }
        }

        let observation = Observation::from_board(&engine.board(), engine.current_player());
        let values = self.policy.action_values(&observation);
        masked_argmax(&values, &legal).unwrap_or(legal[0])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
