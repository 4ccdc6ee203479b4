//! Environment adapter for learning agents: wraps one engine, reframes its
//! board from the mover's perspective and turns step results into rewards.

mod environment;
mod observation;
mod reward;

pub use environment::{Connect4Env, Transition};
pub use observation::{Observation, OBSERVATION_LEN, PLANES};
pub use reward::RewardConfig;
