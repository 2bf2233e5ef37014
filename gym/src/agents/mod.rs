mod random_agent;
mod reflex_agent;

pub use lib::{Agent, SearchAgent};
pub use random_agent::RandomAgent;
pub use reflex_agent::ReflexAgent;
