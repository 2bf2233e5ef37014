//! Explicit game trees, mostly for tests, benchmarks and the HTTP service.
//!
//! A tree is laid out in turn order: the root belongs to agent 0, its
//! children to agent 1 and so on, wrapping around after the last agent.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::InvalidAction;
use crate::eval::Score;
use crate::game::{AgentId, Game, Outcome};
use crate::search::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameTree {
    pub agents: usize,
    pub root: TreeNode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Heuristic score of the node, used when the search stops here.
    #[serde(default)]
    pub score: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Edge>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub action: String,
    pub node: TreeNode,
}

impl TreeNode {
    pub fn leaf(score: Value) -> Self {
        Self {
            score,
            ..Default::default()
        }
    }

    pub fn terminal(score: Value, outcome: Outcome) -> Self {
        Self {
            score,
            outcome: Some(outcome),
            children: Vec::new(),
        }
    }

    pub fn branch<S: Into<String>>(children: impl IntoIterator<Item = (S, TreeNode)>) -> Self {
        Self {
            children: children
                .into_iter()
                .map(|(action, node)| Edge {
                    action: action.into(),
                    node,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_score(mut self, score: Value) -> Self {
        self.score = score;
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn child(&self, action: &str) -> Option<&TreeNode> {
        self.children
            .iter()
            .find(|edge| edge.action == action)
            .map(|edge| &edge.node)
    }

    /// Number of nodes in this subtree, itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|edge| edge.node.size()).sum::<usize>()
    }
}

impl GameTree {
    pub fn new(agents: usize, root: TreeNode) -> Self {
        Self { agents, root }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn position(&self) -> TreePosition<'_> {
        TreePosition {
            agents: self.agents,
            node: &self.root,
        }
    }

    /// A complete tree `rounds` full rounds deep where every node has
    /// `branching` children. Scores are small integers so ties are common.
    /// Nodes below the root become won or lost with probability
    /// `terminal_rate` and keep their children.
    pub fn random<R: Rng>(
        agents: usize,
        branching: usize,
        rounds: usize,
        terminal_rate: f64,
        rng: &mut R,
    ) -> Self {
        let mut root = grow(rng, agents * rounds, branching, terminal_rate);
        root.outcome = None;
        Self::new(agents, root)
    }
}

fn grow<R: Rng>(rng: &mut R, plies: usize, branching: usize, terminal_rate: f64) -> TreeNode {
    let score = rng.random_range(-20i32..=20) as Value;
    let outcome = if terminal_rate > 0.0 && rng.random_bool(terminal_rate) {
        Some(if score >= 0.0 { Outcome::Win } else { Outcome::Lose })
    } else {
        None
    };
    let children = if plies == 0 {
        Vec::new()
    } else {
        (0..branching)
            .map(|i| Edge {
                action: format!("a{i}"),
                node: grow(rng, plies - 1, branching, terminal_rate),
            })
            .collect()
    };
    TreeNode {
        score,
        outcome,
        children,
    }
}

/// A borrowed view of one node, playable through [`Game`].
#[derive(Clone, Copy, Debug)]
pub struct TreePosition<'t> {
    agents: usize,
    node: &'t TreeNode,
}

impl<'t> TreePosition<'t> {
    pub fn node(&self) -> &'t TreeNode {
        self.node
    }
}

impl Game for TreePosition<'_> {
    type Action = String;

    fn num_agents(&self) -> usize {
        self.agents
    }

    // The layout already fixes whose turn it is.
    fn legal_actions(&self, _agent: AgentId) -> Vec<String> {
        self.node
            .children
            .iter()
            .map(|edge| edge.action.clone())
            .collect()
    }

    fn successor(&self, agent: AgentId, action: &String) -> Result<Self, InvalidAction> {
        let node = self
            .node
            .child(action)
            .ok_or_else(|| InvalidAction::new(agent, action))?;
        Ok(Self {
            agents: self.agents,
            node,
        })
    }

    fn is_win(&self) -> bool {
        self.node.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node.outcome == Some(Outcome::Lose)
    }
}

impl Score for TreePosition<'_> {
    fn score(&self) -> Value {
        self.node.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SCENARIO: &str = r#"{
        "agents": 2,
        "root": {
            "children": [
                {"action": "A", "node": {"children": [{"action": "noop", "node": {"score": 10}}]}},
                {"action": "B", "node": {"children": [{"action": "noop", "node": {"score": 5}}]}}
            ]
        }
    }"#;

    #[test]
    fn test_parse_scenario() {
        let tree = GameTree::from_json(SCENARIO).expect("valid tree");
        assert_eq!(tree.agents, 2);
        assert_eq!(tree.root.size(), 5);
        let position = tree.position();
        assert_eq!(position.legal_actions(AgentId(0)), vec!["A", "B"]);
        let a = position.successor(AgentId(0), &"A".to_string()).unwrap();
        let leaf = a.successor(AgentId(1), &"noop".to_string()).unwrap();
        assert_eq!(leaf.score(), 10.0);
        assert!(leaf.legal_actions(AgentId(0)).is_empty());
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let tree = GameTree::from_json(SCENARIO).unwrap();
        let err = tree
            .position()
            .successor(AgentId(0), &"C".to_string())
            .unwrap_err();
        assert_eq!(err.agent, AgentId(0));
        assert_eq!(err.action, "\"C\"");
    }

    #[test]
    fn test_outcomes_round_trip_through_json() {
        let tree = GameTree::new(
            2,
            TreeNode::branch([("x", TreeNode::terminal(100.0, Outcome::Win))]),
        );
        let text = serde_json::to_string(&tree).unwrap();
        assert!(text.contains("\"outcome\":\"win\""));
        let back = GameTree::from_json(&text).unwrap();
        let won = back.position().successor(AgentId(0), &"x".to_string()).unwrap();
        assert!(won.is_win());
        assert!(!won.is_lose());
        assert_eq!(won.outcome(), Some(Outcome::Win));
    }

    #[test]
    fn test_random_tree_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let tree = GameTree::random(3, 2, 2, 0.0, &mut rng);
        // 2^0 + 2^1 + ... + 2^6
        assert_eq!(tree.root.size(), 127);
        assert!(tree.root.outcome.is_none());

        let again = GameTree::random(3, 2, 2, 0.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(tree, again);
    }
}
