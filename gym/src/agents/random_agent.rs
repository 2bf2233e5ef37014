use rand::seq::IndexedRandom;

use lib::{Agent, AgentId, Game, SearchError};

/// A simple agent that picks a uniformly random legal action each turn.
/// This is exactly the opponent model expectimax assumes, which makes it a
/// useful baseline for benchmarking.
pub struct RandomAgent {
    name: String,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            name: "Random".to_string(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Agent<G> for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&self, state: &G, you: AgentId) -> Result<G::Action, SearchError> {
        let mut rng = rand::rng();
        state
            .legal_actions(you)
            .choose(&mut rng)
            .cloned()
            .ok_or(SearchError::NoLegalMoves)
    }
}
