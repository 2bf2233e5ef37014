use crate::search::Value;

/// Leaf scoring for the search. Higher is better for the maximizing agent.
///
/// Implemented for every `Fn(&G) -> Value`, so plain functions and closures
/// can be passed straight to [`decide`](crate::decide).
pub trait Evaluator<G> {
    fn evaluate(&self, state: &G) -> Value;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&G) -> Value,
{
    fn evaluate(&self, state: &G) -> Value {
        self(state)
    }
}

/// States that keep a running score of their own.
pub trait Score {
    fn score(&self) -> Value;
}

/// Scores a state by its own running score and nothing else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreEvaluator;

impl<G: Score> Evaluator<G> for ScoreEvaluator {
    fn evaluate(&self, state: &G) -> Value {
        state.score()
    }
}
