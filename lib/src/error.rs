use std::fmt::Debug;

use thiserror::Error;

use crate::game::AgentId;

/// An environment was asked for the successor of an action that is not
/// currently legal for the given agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{agent} cannot play {action}")]
pub struct InvalidAction {
    pub agent: AgentId,
    pub action: String,
}

impl InvalidAction {
    pub fn new(agent: AgentId, action: &impl Debug) -> Self {
        Self {
            agent,
            action: format!("{action:?}"),
        }
    }
}

/// Everything that stops a search from producing a decision. None of these
/// are transient, they all point at a caller or environment bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("the maximizing agent has no legal moves at the root")]
    NoLegalMoves,

    #[error("the game is already over at the root")]
    GameOver,

    #[error("environment rejected a successor request: {0}")]
    InvalidAction(#[from] InvalidAction),

    #[error("depth limit must be at least 1, got {0}")]
    MalformedDepthLimit(u32),

    #[error("search agents only play the maximizing seat, not {0}")]
    NotMaximizer(AgentId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_action_message() {
        let err = SearchError::from(InvalidAction::new(AgentId(2), &"north"));
        assert_eq!(
            err.to_string(),
            "environment rejected a successor request: agent 2 cannot play \"north\""
        );
    }
}
