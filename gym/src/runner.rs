use std::time::Instant;

use indicatif::ProgressBar;
use rand::Rng;
use tracing::trace;

use lib::{Agent, Game, GameTree, ScoreEvaluator, SearchError, SearchStats, StrategyKind, analyze};

use crate::nim::Nim;
use crate::stats::{ComparisonRow, ComparisonStats, GameResult};

/// Configuration for game generation
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub min_stones: u32,
    pub max_stones: u32,
    pub max_take: u32,
    pub num_agents: usize,
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_stones: 15,
            max_stones: 30,
            max_take: 3,
            num_agents: 3,
            max_turns: 200,
        }
    }
}

impl GameConfig {
    pub fn duel() -> Self {
        Self {
            num_agents: 2,
            ..Default::default()
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Generates a starting pile somewhere in the configured range
pub fn generate_random_game(config: &GameConfig) -> Nim {
    let mut rng = rand::rng();
    let low = config.min_stones.max(1);
    let stones = rng.random_range(low..=config.max_stones.max(low));
    Nim::new(stones, config.max_take, config.num_agents)
}

/// Runs a single game with the given agents, seat `i` played by `agents[i]`
pub fn run_game(agents: &[&dyn Agent<Nim>], config: &GameConfig) -> Result<GameResult, SearchError> {
    assert!(
        agents.len() >= config.num_agents,
        "Need at least {} agents for {} seats",
        config.num_agents,
        config.num_agents
    );

    let mut game = generate_random_game(config);
    let starting_stones = game.stones();
    let mut turn = 0;
    let mut think_micros = 0u64;

    while !game.is_over() && turn < config.max_turns {
        let seat = game.to_move();
        let started = Instant::now();
        let take = agents[seat.0].choose_action(&game, seat)?;
        if seat.is_maximizer() {
            think_micros += started.elapsed().as_micros() as u64;
        }
        trace!(turn, %seat, take, stones = game.stones(), "move");
        game = game.successor(seat, &take)?;
        turn += 1;
    }

    Ok(GameResult {
        winner: game.winner().map(|w| w.0),
        turns: turn,
        num_agents: config.num_agents,
        starting_stones,
        think_micros,
    })
}

fn run_tracked(
    agents: &[&dyn Agent<Nim>],
    config: &GameConfig,
    progress: Option<&ProgressBar>,
) -> Result<GameResult, SearchError> {
    let result = run_game(agents, config);
    if let Some(pb) = progress {
        pb.inc(1);
    }
    result
}

/// Run multiple games and collect results, ticking `progress` once per game
pub fn run_tournament(
    agents: &[&dyn Agent<Nim>],
    config: &GameConfig,
    num_games: usize,
    progress: Option<&ProgressBar>,
) -> Result<Vec<GameResult>, SearchError> {
    (0..num_games)
        .map(|_| run_tracked(agents, config, progress))
        .collect()
}

/// Run multiple games in parallel
pub fn run_tournament_parallel(
    agents: &[&dyn Agent<Nim>],
    config: &GameConfig,
    num_games: usize,
    progress: Option<&ProgressBar>,
) -> Result<Vec<GameResult>, SearchError> {
    use rayon::prelude::*;

    (0..num_games)
        .into_par_iter()
        .map(|_| run_tracked(agents, config, progress))
        .collect()
}

/// Runs every strategy at every depth up to `max_depth` on each tree,
/// summing the search counters and averaging the root values.
pub fn compare_strategies(trees: &[GameTree], max_depth: u32) -> Result<ComparisonStats, SearchError> {
    let mut comparison = ComparisonStats {
        trees: trees.len(),
        rows: Vec::new(),
    };

    for depth in 1..=max_depth {
        for strategy in StrategyKind::ALL {
            let mut total = SearchStats::default();
            let mut value_sum = 0.0;
            let mut first_action = None;
            for (i, tree) in trees.iter().enumerate() {
                let analysis = analyze(&strategy, &tree.position(), depth, &ScoreEvaluator)?;
                total.expanded += analysis.stats.expanded;
                total.leaves += analysis.stats.leaves;
                total.cutoffs += analysis.stats.cutoffs;
                value_sum += analysis.value;
                if i == 0 {
                    first_action = analysis.action;
                }
            }
            comparison.rows.push(ComparisonRow {
                strategy: strategy.to_string(),
                depth,
                value: value_sum / trees.len().max(1) as f32,
                action: first_action,
                stats: total,
            });
        }
    }
    Ok(comparison)
}
