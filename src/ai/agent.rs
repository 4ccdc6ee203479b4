use crate::game::Connect4Engine;

/// Universal interface for anything that picks columns.
pub trait Agent {
    /// Select an action (column) for the player to move in `engine`.
    ///
    /// `exploration_rate` is the probability of a uniformly random legal move;
    /// agents without a learned policy may ignore it.
    fn select_action(&mut self, engine: &Connect4Engine, exploration_rate: f32) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn select_action(&mut self, engine: &Connect4Engine, exploration_rate: f32) -> usize {
        (**self).select_action(engine, exploration_rate)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
