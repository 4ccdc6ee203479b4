//! # Connect Four RL
//!
//! A Connect Four rules engine and the pieces that sit on top of it when
//! playing against a learned agent.
//!
//! ## Modules
//!
//! - [`game`]: Board, players, and the engine: move validation, turn order,
//!   win/draw detection
//! - [`env`]: Environment adapter: perspective-relative observations and rewards
//! - [`ai`]: Agent trait, random and rule-based opponents, opaque policy wrapper
//! - [`training`]: Episodes, evaluation, metrics, arena runner
//! - [`session`]: Per-session engine store with expiry
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//! - [`logging`]: `tracing` subscriber setup for the binaries

pub mod ai;
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
pub mod training;
