use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::{StrategyKind, UnknownStrategy};

pub const STRATEGY_VAR: &str = "SEARCH_STRATEGY";
pub const DEPTH_VAR: &str = "SEARCH_DEPTH";

/// Which strategy to run and how many full rounds to look ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    2
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            depth: default_depth(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SEARCH_STRATEGY: {0}")]
    Strategy(#[from] UnknownStrategy),

    #[error("SEARCH_DEPTH must be a positive integer, got '{value}'")]
    Depth {
        value: String,
        #[source]
        source: Option<ParseIntError>,
    },
}

impl SearchConfig {
    pub fn new(strategy: StrategyKind, depth: u32) -> Self {
        Self { strategy, depth }
    }

    /// Reads `SEARCH_STRATEGY` and `SEARCH_DEPTH`, falling back to the
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(strategy) = lookup(STRATEGY_VAR) {
            config.strategy = strategy.parse()?;
        }
        if let Some(depth) = lookup(DEPTH_VAR) {
            config.depth = match depth.trim().parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::Depth {
                        value: depth,
                        source: None,
                    })
                }
                Ok(parsed) => parsed,
                Err(source) => {
                    return Err(ConfigError::Depth {
                        value: depth,
                        source: Some(source),
                    })
                }
            };
        }
        Ok(config)
    }
}
