use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::game::{AgentId, Game};
use crate::search::decide;

/// Trait that defines an agent's decision-making interface.
pub trait Agent<G: Game>: Send + Sync {
    /// Returns the name of this agent for display purposes.
    fn name(&self) -> &str;

    /// Choose an action given the current state and the seat to play as.
    fn choose_action(&self, state: &G, you: AgentId) -> Result<G::Action, SearchError>;

    /// Optional: Reset any internal state between games.
    fn reset(&mut self) {}
}

impl<G: Game, A: Agent<G> + ?Sized> Agent<G> for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_action(&self, state: &G, you: AgentId) -> Result<G::Action, SearchError> {
        (**self).choose_action(state, you)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Plays the maximizing seat with one of the search strategies.
pub struct SearchAgent<E> {
    name: String,
    config: SearchConfig,
    evaluator: E,
}

impl<E> SearchAgent<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self {
            name: format!("{}-d{}", config.strategy, config.depth),
            config,
            evaluator,
        }
    }

    pub fn with_name(name: impl Into<String>, config: SearchConfig, evaluator: E) -> Self {
        Self {
            name: name.into(),
            config,
            evaluator,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl<G, E> Agent<G> for SearchAgent<E>
where
    G: Game,
    E: Evaluator<G> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&self, state: &G, you: AgentId) -> Result<G::Action, SearchError> {
        if !you.is_maximizer() {
            return Err(SearchError::NotMaximizer(you));
        }
        decide(&self.config.strategy, state, self.config.depth, &self.evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ScoreEvaluator;
    use crate::search::StrategyKind;
    use crate::search::tests::single_noop_tree;
    use crate::tree::TreePosition;

    #[test]
    fn test_search_agent_plays_the_maximizer() {
        let tree = single_noop_tree();
        let agent = SearchAgent::new(SearchConfig::new(StrategyKind::Minimax, 1), ScoreEvaluator);
        assert_eq!(Agent::<TreePosition<'_>>::name(&agent), "minimax-d1");
        assert_eq!(agent.choose_action(&tree.position(), AgentId(0)).unwrap(), "A");
    }

    #[test]
    fn test_search_agent_refuses_other_seats() {
        let tree = single_noop_tree();
        let agent = SearchAgent::new(SearchConfig::default(), ScoreEvaluator);
        let err = agent.choose_action(&tree.position(), AgentId(1)).unwrap_err();
        assert_eq!(err, SearchError::NotMaximizer(AgentId(1)));
    }

    #[test]
    fn test_boxed_agents_delegate() {
        let tree = single_noop_tree();
        let position = tree.position();
        let boxed: Box<dyn Agent<TreePosition<'_>>> = Box::new(SearchAgent::with_name(
            "boxed",
            SearchConfig::new(StrategyKind::Expectimax, 1),
            ScoreEvaluator,
        ));
        assert_eq!(Agent::<TreePosition<'_>>::name(&boxed), "boxed");
        assert_eq!(boxed.choose_action(&position, AgentId(0)).unwrap(), "A");
    }
}
