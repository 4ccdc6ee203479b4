//! Episode plumbing on top of the environment: episodes with outcome
//! attribution, head-to-head evaluation, rolling metrics and the arena runner.

pub mod arena;
pub mod episode;
pub mod metrics;

pub use arena::{Arena, ArenaConfig, ArenaReport};
pub use episode::{
    attribute_outcome, evaluate, play_episode, play_match, play_self_play_episode, EpisodeTrace,
    EvalMetrics, Experience,
};
pub use metrics::{EpisodeResult, TrainingMetrics};
