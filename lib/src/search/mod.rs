//! Depth-limited adversarial search.
//!
//! Every strategy walks the tree the same way: agents move in index order,
//! the depth counter advances once per full round, and a node is scored by
//! the evaluator when the depth limit is hit, the game is over, or the agent
//! to move has nothing to play. Strategies only differ in how they fold the
//! values of a node's children, see [`Strategy::expand`].

mod alphabeta;
mod expectimax;
mod minimax;

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::game::{AgentId, Game};

pub use alphabeta::AlphaBeta;
pub use expectimax::Expectimax;
pub use minimax::Minimax;

pub type Value = f32;

/// Alpha-beta bounds along the current path. `alpha` is the best value the
/// maximizer is already guaranteed, `beta` the best for the minimizers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub alpha: Value,
    pub beta: Value,
}

impl Window {
    pub const FULL: Window = Window {
        alpha: Value::NEG_INFINITY,
        beta: Value::INFINITY,
    };
}

impl Default for Window {
    fn default() -> Self {
        Self::FULL
    }
}

/// Value of a node together with the action that produced it. Leaves carry
/// no action.
#[derive(Clone, Debug, PartialEq)]
pub struct Scored<A> {
    pub value: Value,
    pub action: Option<A>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes whose children were generated.
    pub expanded: u64,
    /// Calls to the leaf evaluator.
    pub leaves: u64,
    /// Alpha-beta cutoffs that skipped at least one sibling.
    pub cutoffs: u64,
}

/// Result of a search from the root, before any decision checks.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis<A> {
    pub value: Value,
    pub action: Option<A>,
    pub stats: SearchStats,
}

/// A root action the maximizer can actually play.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    pub value: Value,
    pub stats: SearchStats,
}

/// How a strategy combines the children of an expanded node.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Fold the children reached through `actions` (never empty) into one
    /// value. Children are scored through [`Search::child`], which keeps the
    /// turn order and depth bookkeeping in one place.
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
        E: Evaluator<G> + ?Sized;

    fn analyze<G, E>(
        &self,
        root: &G,
        depth_limit: u32,
        evaluator: &E,
    ) -> Result<Analysis<G::Action>, SearchError>
    where
        Self: Sized,
        G: Game,
        E: Evaluator<G> + ?Sized,
    {
        analyze(self, root, depth_limit, evaluator)
    }

    fn decide<G, E>(&self, root: &G, depth_limit: u32, evaluator: &E) -> Result<G::Action, SearchError>
    where
        Self: Sized,
        G: Game,
        E: Evaluator<G> + ?Sized,
    {
        decide(self, root, depth_limit, evaluator)
    }
}

/// State of one top-level search: the evaluator, the depth limit and the
/// counters. Nothing survives between searches.
pub struct Search<'e, E: ?Sized> {
    evaluator: &'e E,
    depth_limit: u32,
    stats: SearchStats,
}

impl<'e, E: ?Sized> Search<'e, E> {
    pub fn new(evaluator: &'e E, depth_limit: u32) -> Self {
        Self {
            evaluator,
            depth_limit,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Value of `state` with `agent` to move, `depth` full rounds below the
    /// root.
    pub fn evaluate<G, S>(
        &mut self,
        strategy: &S,
        state: &G,
        mut agent: AgentId,
        mut depth: u32,
        window: Window,
    ) -> Result<Scored<G::Action>, SearchError>
    where
        G: Game,
        E: Evaluator<G>,
        S: Strategy + ?Sized,
    {
        if agent.0 == state.num_agents() {
            agent = AgentId::MAXIMIZER;
            depth += 1;
        }
        if depth >= self.depth_limit || state.is_win() || state.is_lose() {
            return Ok(self.leaf(state));
        }
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Ok(self.leaf(state));
        }
        self.stats.expanded += 1;
        strategy.expand(self, state, agent, actions, depth, window)
    }

    /// Value of the state reached when `agent` plays `action`; the next agent
    /// in turn order moves there.
    pub fn child<G, S>(
        &mut self,
        strategy: &S,
        state: &G,
        agent: AgentId,
        action: &G::Action,
        depth: u32,
        window: Window,
    ) -> Result<Value, SearchError>
    where
        G: Game,
        E: Evaluator<G>,
        S: Strategy + ?Sized,
    {
        let next = state.successor(agent, action)?;
        Ok(self.evaluate(strategy, &next, agent.next(), depth, window)?.value)
    }

    fn note_cutoff(&mut self, skipped: usize) {
        if skipped > 0 {
            self.stats.cutoffs += 1;
        }
    }

    fn leaf<G>(&mut self, state: &G) -> Scored<G::Action>
    where
        G: Game,
        E: Evaluator<G>,
    {
        self.stats.leaves += 1;
        Scored {
            value: self.evaluator.evaluate(state),
            action: None,
        }
    }
}

/// Searches from `root` with the maximizer to move. A depth limit of 0
/// scores the root itself and expands nothing.
pub fn analyze<G, E, S>(
    strategy: &S,
    root: &G,
    depth_limit: u32,
    evaluator: &E,
) -> Result<Analysis<G::Action>, SearchError>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
    S: Strategy + ?Sized,
{
    let mut search = Search::new(evaluator, depth_limit);
    let scored = search.evaluate(strategy, root, AgentId::MAXIMIZER, 0, Window::FULL)?;
    Ok(Analysis {
        value: scored.value,
        action: scored.action,
        stats: search.stats,
    })
}

/// Like [`decide`], keeping the root value and the search counters.
pub fn decision<G, E, S>(
    strategy: &S,
    root: &G,
    depth_limit: u32,
    evaluator: &E,
) -> Result<Decision<G::Action>, SearchError>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
    S: Strategy + ?Sized,
{
    if depth_limit == 0 {
        return Err(SearchError::MalformedDepthLimit(depth_limit));
    }
    if root.is_over() {
        return Err(SearchError::GameOver);
    }
    let analysis = analyze(strategy, root, depth_limit, evaluator)?;
    debug!(
        strategy = strategy.name(),
        depth_limit,
        value = analysis.value,
        expanded = analysis.stats.expanded,
        leaves = analysis.stats.leaves,
        cutoffs = analysis.stats.cutoffs,
        "search finished"
    );
    let action = analysis.action.ok_or(SearchError::NoLegalMoves)?;
    Ok(Decision {
        action,
        value: analysis.value,
        stats: analysis.stats,
    })
}

/// Picks the maximizer's action at `root`, looking `depth_limit` full
/// rounds ahead.
pub fn decide<G, E, S>(
    strategy: &S,
    root: &G,
    depth_limit: u32,
    evaluator: &E,
) -> Result<G::Action, SearchError>
where
    G: Game,
    E: Evaluator<G> + ?Sized,
    S: Strategy + ?Sized,
{
    decision(strategy, root, depth_limit, evaluator).map(|decision| decision.action)
}

/// The strategies by name, for configuration and command lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Minimax,
    #[default]
    #[serde(alias = "alpha-beta", alias = "alpha_beta")]
    AlphaBeta,
    Expectimax,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Minimax,
        StrategyKind::AlphaBeta,
        StrategyKind::Expectimax,
    ];
}

impl Strategy for StrategyKind {
    fn name(&self) -> &'static str {
        match self {
            StrategyKind::Minimax => Minimax.name(),
            StrategyKind::AlphaBeta => AlphaBeta.name(),
            StrategyKind::Expectimax => Expectimax.name(),
        }
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
        match self {
            StrategyKind::Minimax => Minimax.expand(search, state, agent, actions, depth, window),
            StrategyKind::AlphaBeta => AlphaBeta.expand(search, state, agent, actions, depth, window),
            StrategyKind::Expectimax => {
                Expectimax.expand(search, state, agent, actions, depth, window)
            }
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search strategy '{0}' (expected minimax, alphabeta or expectimax)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(StrategyKind::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(StrategyKind::AlphaBeta),
            "expectimax" => Ok(StrategyKind::Expectimax),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
