use serde::{Deserialize, Serialize};

use lib::{AgentId, Game, InvalidAction, Score, Value};

/// Multi-player subtraction game. Agents take turns removing between 1 and
/// `max_take` stones from a single pile; whoever takes the last stone wins.
/// Seat 0 is the maximizer, every other seat plays against it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nim {
    stones: u32,
    max_take: u32,
    agents: usize,
    to_move: AgentId,
    last_taker: Option<AgentId>,
}

pub const WIN_SCORE: Value = 100.0;

impl Nim {
    pub fn new(stones: u32, max_take: u32, agents: usize) -> Self {
        Self {
            stones,
            max_take: max_take.max(1),
            agents: agents.max(1),
            to_move: AgentId::MAXIMIZER,
            last_taker: None,
        }
    }

    pub fn stones(&self) -> u32 {
        self.stones
    }

    pub fn max_take(&self) -> u32 {
        self.max_take
    }

    pub fn to_move(&self) -> AgentId {
        self.to_move
    }

    pub fn winner(&self) -> Option<AgentId> {
        if self.stones == 0 {
            self.last_taker
        } else {
            None
        }
    }
}

impl Game for Nim {
    type Action = u32;

    fn num_agents(&self) -> usize {
        self.agents
    }

    fn legal_actions(&self, agent: AgentId) -> Vec<u32> {
        if agent != self.to_move || self.stones == 0 {
            return Vec::new();
        }
        (1..=self.max_take.min(self.stones)).collect()
    }

    fn successor(&self, agent: AgentId, take: &u32) -> Result<Self, InvalidAction> {
        if agent != self.to_move || *take == 0 || *take > self.max_take.min(self.stones) {
            return Err(InvalidAction::new(agent, take));
        }
        Ok(Self {
            stones: self.stones - take,
            to_move: AgentId((agent.0 + 1) % self.agents),
            last_taker: Some(agent),
            ..self.clone()
        })
    }

    fn is_win(&self) -> bool {
        self.winner() == Some(AgentId::MAXIMIZER)
    }

    fn is_lose(&self) -> bool {
        matches!(self.winner(), Some(agent) if !agent.is_maximizer())
    }
}

impl Score for Nim {
    fn score(&self) -> Value {
        if self.is_win() {
            WIN_SCORE
        } else if self.is_lose() {
            -WIN_SCORE
        } else {
            0.0
        }
    }
}

/// Rough positional read for unfinished games: the maximizer wants the pile
/// within reach on its own turn and out of reach on everyone else's.
pub fn heuristic(state: &Nim) -> Value {
    if state.is_over() {
        return state.score();
    }
    let reach = state.max_take();
    let stones = state.stones();
    if state.to_move().is_maximizer() {
        if stones <= reach {
            WIN_SCORE / 2.0
        } else if stones % (reach + 1) == 0 {
            -10.0
        } else {
            10.0
        }
    } else if stones <= reach {
        -WIN_SCORE / 2.0
    } else {
        0.0
    }
}
