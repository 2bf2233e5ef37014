use super::minimax::Minimax;
use super::{Scored, Search, Strategy, Value, Window};
use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::game::{AgentId, Game};

/// Expectimax: the maximizer takes the best child, every other agent is
/// modeled as picking uniformly at random among its legal actions.
///
/// Chance nodes report their first action. The value there is an average,
/// no single child produced it, but callers still get a well-defined token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Expectimax;

impl Strategy for Expectimax {
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn expand<G, E>(
        &self,
        search: &mut Search<'_, E>,
        state: &G,
        agent: AgentId,
        actions: Vec<G::Action>,
        depth: u32,
        window: Window,
    ) -> Result<Scored<G::Action>, SearchError>
    where
        G: Game,
        E: Evaluator<G> + ?Sized,
    {
        if agent.is_maximizer() {
            return Minimax::extremum(self, search, state, agent, actions, depth, window, true);
        }
        let mut total: Value = 0.0;
        for action in &actions {
            total += search.child(self, state, agent, action, depth, window)?;
        }
        Ok(Scored {
            value: total / actions.len() as Value,
            action: actions.into_iter().next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ScoreEvaluator;
    use crate::search::tests::textbook_tree;
    use crate::search::{analyze, AlphaBeta};
    use crate::game::Outcome;
    use crate::tree::{GameTree, TreeNode};

    #[test]
    fn test_textbook_tree_averages_replies() {
        let tree = textbook_tree();
        let analysis = analyze(&Expectimax, &tree.position(), 1, &ScoreEvaluator).unwrap();
        // A averages 23/3, B 4, C 7.
        assert!((analysis.value - 23.0 / 3.0).abs() < 1e-5);
        assert_eq!(analysis.action.as_deref(), Some("A"));
        assert_eq!(analysis.stats.leaves, 9);
    }

    #[test]
    fn test_chance_node_reports_first_action() {
        let tree = textbook_tree();
        let position = tree.position();
        let under_c = position.successor(AgentId(0), &"C".to_string()).unwrap();

        let mut search = Search::new(&ScoreEvaluator, 1);
        let scored = search
            .evaluate(&Expectimax, &under_c, AgentId(1), 0, Window::FULL)
            .unwrap();
        assert_eq!(scored.value, 7.0);
        assert_eq!(scored.action.as_deref(), Some("r0"));
        assert_eq!(search.stats().leaves, 3);
    }

    #[test]
    fn test_expectation_can_overturn_minimax() {
        // Minimax fears the single bad reply under "risky", expectimax does not.
        let tree = GameTree::new(
            2,
            TreeNode::branch([
                ("safe", TreeNode::branch([("r0", TreeNode::leaf(4.0))])),
                (
                    "risky",
                    TreeNode::branch([
                        ("r0", TreeNode::leaf(0.0)),
                        ("r1", TreeNode::leaf(10.0)),
                        ("r2", TreeNode::leaf(10.0)),
                    ]),
                ),
            ]),
        );
        let cautious = AlphaBeta.decide(&tree.position(), 1, &ScoreEvaluator).unwrap();
        let hopeful = Expectimax.decide(&tree.position(), 1, &ScoreEvaluator).unwrap();
        assert_eq!(cautious, "safe");
        assert_eq!(hopeful, "risky");
    }

    #[test]
    fn test_mixed_infinite_replies_do_not_win() {
        // Averaging a won and a lost reply is undefined; the finite branch wins.
        for gamble_first in [true, false] {
            let gamble = (
                "gamble",
                TreeNode::branch([
                    ("r0", TreeNode::terminal(Value::INFINITY, Outcome::Win)),
                    ("r1", TreeNode::terminal(Value::NEG_INFINITY, Outcome::Lose)),
                ]),
            );
            let safe = ("safe", TreeNode::branch([("r0", TreeNode::leaf(5.0))]));
            let children = if gamble_first { [gamble, safe] } else { [safe, gamble] };
            let tree = GameTree::new(2, TreeNode::branch(children));
            let analysis = analyze(&Expectimax, &tree.position(), 1, &ScoreEvaluator).unwrap();
            assert_eq!(analysis.action.as_deref(), Some("safe"));
            assert_eq!(analysis.value, 5.0);
        }
    }
}
