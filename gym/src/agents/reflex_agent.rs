use lib::{Agent, AgentId, Evaluator, Game, SearchError, Value};

/// One-ply agent: scores the state after each of its legal actions with an
/// evaluator and takes the best one. The maximizing seat looks for the
/// highest score, every other seat for the lowest. Ties go to the first
/// action in legal order.
pub struct ReflexAgent<E> {
    name: String,
    evaluator: E,
}

impl<E> ReflexAgent<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            name: "Reflex".to_string(),
            evaluator,
        }
    }

    pub fn with_name(name: impl Into<String>, evaluator: E) -> Self {
        Self {
            name: name.into(),
            evaluator,
        }
    }
}

impl<G, E> Agent<G> for ReflexAgent<E>
where
    G: Game,
    E: Evaluator<G> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&self, state: &G, you: AgentId) -> Result<G::Action, SearchError> {
        let sign: Value = if you.is_maximizer() { 1.0 } else { -1.0 };
        let mut best: Option<(Value, G::Action)> = None;
        for action in state.legal_actions(you) {
            let next = state.successor(you, &action)?;
            let score = sign * self.evaluator.evaluate(&next);
            if best.as_ref().is_none_or(|(top, _)| score > *top) {
                best = Some((score, action));
            }
        }
        best.map(|(_, action)| action).ok_or(SearchError::NoLegalMoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nim::{Nim, heuristic};

    #[test]
    fn test_reflex_takes_an_immediate_win() {
        let agent = ReflexAgent::new(heuristic);
        let game = Nim::new(3, 3, 2);
        assert_eq!(agent.choose_action(&game, AgentId(0)).unwrap(), 3);
    }

    #[test]
    fn test_reflex_adversary_minimizes() {
        let agent = ReflexAgent::new(heuristic);
        let game = Nim::new(5, 3, 2).successor(AgentId(0), &3).unwrap();
        // Two stones left on seat 1's turn: taking both beats the maximizer.
        assert_eq!(agent.choose_action(&game, AgentId(1)).unwrap(), 2);
    }

    #[test]
    fn test_reflex_ties_keep_first_action() {
        let agent = ReflexAgent::new(|_: &Nim| -> Value { 0.0 });
        let game = Nim::new(9, 3, 2);
        assert_eq!(agent.choose_action(&game, AgentId(0)).unwrap(), 1);
    }
}
