use tracing::trace;

use super::{Scored, Search, Strategy, Value, Window};
use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::game::{AgentId, Game};

/// Minimax with alpha-beta pruning.
///
/// The window only travels forward to siblings not yet visited and down to
/// descendants. Cutoffs use strict comparisons, so a child whose value equals
/// the bound is still explored and the root value always matches
/// [`Minimax`](super::Minimax), including the chosen action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlphaBeta;

impl Strategy for AlphaBeta {
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn expand<G, E>(
        &self,
        search: &mut Search<'_, E>,
        state: &G,
        agent: AgentId,
        actions: Vec<G::Action>,
        depth: u32,
        mut window: Window,
    ) -> Result<Scored<G::Action>, SearchError>
    where
        G: Game,
        E: Evaluator<G> + ?Sized,
    {
        let maximizing = agent.is_maximizer();
        let mut best = Scored {
            value: if maximizing {
                Value::NEG_INFINITY
            } else {
                Value::INFINITY
            },
            action: None,
        };
        let count = actions.len();
        for (i, action) in actions.into_iter().enumerate() {
            let value = search.child(self, state, agent, &action, depth, window)?;
            if maximizing {
                if best.action.is_none() || value > best.value {
                    best = Scored {
                        value,
                        action: Some(action),
                    };
                }
                if best.value > window.beta {
                    search.note_cutoff(count - i - 1);
                    trace!(%agent, depth, value = best.value, beta = window.beta, "beta cutoff");
                    return Ok(best);
                }
                window.alpha = window.alpha.max(best.value);
            } else {
                if best.action.is_none() || value < best.value {
                    best = Scored {
                        value,
                        action: Some(action),
                    };
                }
                if best.value < window.alpha {
                    search.note_cutoff(count - i - 1);
                    trace!(%agent, depth, value = best.value, alpha = window.alpha, "alpha cutoff");
                    return Ok(best);
                }
                window.beta = window.beta.min(best.value);
            }
        }
        Ok(best)
    }
}
