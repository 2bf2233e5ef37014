pub mod agent;
mod config;
mod error;
mod eval;
pub mod game;
pub mod search;
pub mod tree;

pub use agent::{Agent, SearchAgent};
pub use config::{ConfigError, SearchConfig};
pub use error::{InvalidAction, SearchError};
pub use eval::{Evaluator, Score, ScoreEvaluator};
pub use game::{AgentId, Game, Outcome};
pub use search::{
    analyze, decide, decision, AlphaBeta, Analysis, Decision, Expectimax, Minimax, Search,
    SearchStats, Strategy, StrategyKind, UnknownStrategy, Value, Window,
};
pub use tree::{Edge, GameTree, TreeNode, TreePosition};
