use serde::{Deserialize, Serialize};

use lib::{
    GameTree, ScoreEvaluator, SearchConfig, SearchError, SearchStats, StrategyKind, Value,
    decision,
};

/// Body of `POST /decide`. Missing fields fall back to the service defaults.
#[derive(Clone, Debug, Deserialize)]
pub struct DecideRequest {
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    #[serde(default)]
    pub depth: Option<u32>,
    pub tree: GameTree,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecideResponse {
    pub action: String,
    pub value: Value,
    pub strategy: StrategyKind,
    pub depth: u32,
    pub stats: SearchStats,
}

pub fn decode_request(mut text: String) -> color_eyre::Result<DecideRequest> {
    let decoded: DecideRequest = unsafe { simd_json::serde::from_str(&mut text) }?;
    Ok(decoded)
}

/// Runs the requested strategy on the tree's root, scoring leaves by their
/// stored scores.
pub fn calc_decision(
    request: &DecideRequest,
    defaults: &SearchConfig,
) -> Result<DecideResponse, SearchError> {
    let strategy = request.strategy.unwrap_or(defaults.strategy);
    let depth = request.depth.unwrap_or(defaults.depth);
    let decided = decision(&strategy, &request.tree.position(), depth, &ScoreEvaluator)?;
    Ok(DecideResponse {
        action: decided.action,
        value: decided.value,
        strategy,
        depth,
        stats: decided.stats,
    })
}
