use super::{Scored, Search, Strategy, Value, Window};
use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::game::{AgentId, Game};

/// Plain minimax: the maximizer takes the best child, every other agent the
/// worst. Visits every node within the depth limit exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Minimax;

impl Minimax {
    /// Best (or worst) child in action order. Ties keep the first action
    /// seen, and the first child always seeds the result so a node whose
    /// children are all infinite still reports an action.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn extremum<G, E, S>(
        strategy: &S,
        search: &mut Search<'_, E>,
        state: &G,
        agent: AgentId,
        actions: Vec<G::Action>,
        depth: u32,
        window: Window,
        maximize: bool,
    ) -> Result<Scored<G::Action>, SearchError>
    where
        G: Game,
        E: Evaluator<G> + ?Sized,
        S: Strategy + ?Sized,
    {
        let mut best = Scored {
            value: if maximize {
                Value::NEG_INFINITY
            } else {
                Value::INFINITY
            },
            action: None,
        };
        for action in actions {
            let value = search.child(strategy, state, agent, &action, depth, window)?;
            let improves = if maximize {
                value > best.value
            } else {
                value < best.value
            };
            // A NaN (an expectation over both infinities) never beats a real value.
            let replaces_nan = best.value.is_nan() && !value.is_nan();
            if best.action.is_none() || improves || replaces_nan {
                best = Scored {
                    value,
                    action: Some(action),
                };
            }
        }
        Ok(best)
    }
}

impl Strategy for Minimax {
    fn name(&self) -> &'static str {
        "minimax"
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
        Self::extremum(
            self,
            search,
            state,
            agent,
            actions,
            depth,
            window,
            agent.is_maximizer(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ScoreEvaluator;
    use crate::search::tests::textbook_tree;
    use crate::search::{analyze, decide};
    use crate::tree::{GameTree, TreeNode};

    #[test]
    fn test_textbook_tree() {
        let tree = textbook_tree();
        let analysis = analyze(&Minimax, &tree.position(), 1, &ScoreEvaluator).unwrap();
        assert_eq!(analysis.value, 3.0);
        assert_eq!(analysis.action.as_deref(), Some("A"));
        assert_eq!(analysis.stats.leaves, 9);
        assert_eq!(analysis.stats.expanded, 4);
        assert_eq!(analysis.stats.cutoffs, 0);
    }

    #[test]
    fn test_ties_keep_first_action() {
        let tree = GameTree::new(
            2,
            TreeNode::branch([
                ("west", TreeNode::branch([("stay", TreeNode::leaf(7.0))])),
                ("east", TreeNode::branch([("stay", TreeNode::leaf(7.0))])),
                ("north", TreeNode::branch([("stay", TreeNode::leaf(1.0))])),
            ]),
        );
        for _ in 0..3 {
            let action = decide(&Minimax, &tree.position(), 1, &ScoreEvaluator).unwrap();
            assert_eq!(action, "west");
        }
    }

    #[test]
    fn test_all_losing_children_still_yield_an_action() {
        let tree = GameTree::new(
            2,
            TreeNode::branch([
                ("a", TreeNode::branch([("x", TreeNode::leaf(0.0))])),
                ("b", TreeNode::branch([("x", TreeNode::leaf(0.0))])),
            ]),
        );
        let doomed = |_: &crate::tree::TreePosition<'_>| -> Value { Value::NEG_INFINITY };
        let action = decide(&Minimax, &tree.position(), 1, &doomed).unwrap();
        assert_eq!(action, "a");
    }

    #[test]
    fn test_single_agent_only_maximizes() {
        let tree = GameTree::new(
            1,
            TreeNode::branch([
                ("low", TreeNode::leaf(1.0)),
                ("high", TreeNode::leaf(9.0)),
            ]),
        );
        let analysis = analyze(&Minimax, &tree.position(), 1, &ScoreEvaluator).unwrap();
        assert_eq!(analysis.value, 9.0);
        assert_eq!(analysis.action.as_deref(), Some("high"));
    }
}
