//! Search gym: pits the search strategies against baseline agents on
//! multi-player Nim and compares their effort on random game trees.

pub mod agents;
pub mod nim;
pub mod runner;
pub mod stats;

pub use agents::{Agent, RandomAgent, ReflexAgent, SearchAgent};
pub use nim::Nim;
pub use runner::{
    GameConfig, compare_strategies, run_game, run_tournament, run_tournament_parallel,
};
pub use stats::{AgentStats, ComparisonRow, ComparisonStats, GameResult, TournamentStats};
