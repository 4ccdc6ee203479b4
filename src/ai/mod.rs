//! Agents that choose columns: the shared [`Agent`] trait, uniform random and
//! rule-based opponents, and an epsilon-greedy wrapper around an opaque policy.

mod agent;
mod policy;
mod random;
mod rule_based;
pub mod state_encoding;

pub use agent::Agent;
pub use policy::{masked_argmax, Policy, PolicyAgent};
pub use random::RandomAgent;
pub use rule_based::RuleBasedAgent;

/// Build a named opponent.
pub fn agent_by_name(name: &str, seed: Option<u64>) -> Option<Box<dyn Agent + Send>> {
    let agent: Box<dyn Agent + Send> = match (name, seed) {
        ("random", Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        ("random", None) => Box::new(RandomAgent::new()),
        ("rules", Some(seed)) => Box::new(RuleBasedAgent::with_seed(seed)),
        ("rules", None) => Box::new(RuleBasedAgent::new()),
        _ => return None,
    };
    Some(agent)
}
