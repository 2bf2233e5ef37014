use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use crate::error::InvalidAction;

/// Position of an agent in the turn order.
///
/// Agent 0 is always the maximizing agent, every other index is an
/// adversary (or a chance agent, depending on the strategy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    pub const MAXIMIZER: AgentId = AgentId(0);

    pub fn is_maximizer(self) -> bool {
        self == Self::MAXIMIZER
    }

    /// The agent moving after this one. May equal the agent count, which
    /// the search treats as the end of a round.
    pub fn next(self) -> AgentId {
        AgentId(self.0 + 1)
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

/// The environment side of the search: anything that can enumerate moves,
/// produce successor states and tell whether the game is over.
///
/// Implementors are treated as immutable snapshots. `successor` must leave
/// `self` untouched, siblings are generated from the same parent.
pub trait Game: Sized {
    type Action: Clone + Debug;

    /// Number of agents taking part, at least 1.
    fn num_agents(&self) -> usize;

    /// Legal actions for `agent`, in a stable order. Empty when the agent
    /// cannot move, which the search scores as a leaf.
    fn legal_actions(&self, agent: AgentId) -> Vec<Self::Action>;

    fn successor(&self, agent: AgentId, action: &Self::Action) -> Result<Self, InvalidAction>;

    /// The maximizing agent has won.
    fn is_win(&self) -> bool;

    /// The maximizing agent has lost.
    fn is_lose(&self) -> bool;

    fn outcome(&self) -> Option<Outcome> {
        if self.is_win() {
            Some(Outcome::Win)
        } else if self.is_lose() {
            Some(Outcome::Lose)
        } else {
            None
        }
    }

    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_agent_walks_turn_order() {
        assert_eq!(AgentId::MAXIMIZER.next(), AgentId(1));
        assert_eq!(AgentId(2).next(), AgentId(3));
        assert!(AgentId(0).is_maximizer());
        assert!(!AgentId(1).is_maximizer());
    }

    #[test]
    fn test_outcome_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Outcome::Win).unwrap(), "\"win\"");
        let lose: Outcome = serde_json::from_str("\"lose\"").unwrap();
        assert_eq!(lose, Outcome::Lose);
    }
}
