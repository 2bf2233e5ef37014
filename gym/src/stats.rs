use serde::{Deserialize, Serialize};

use lib::{SearchStats, Value};

/// Result of a single game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameResult {
    /// Seat of the winning agent, or None if the turn limit ran out
    pub winner: Option<usize>,
    /// Number of turns the game lasted
    pub turns: u32,
    /// Number of seats in the game
    pub num_agents: usize,
    pub starting_stones: u32,
    /// Time the seat 0 agent spent choosing moves
    pub think_micros: u64,
}

/// Aggregated statistics for the agent playing seat 0
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub total_turns: u64,
    pub total_think_micros: u64,
}

impl AgentStats {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Fold the results of games where this agent sat in seat 0
    pub fn from_results(name: String, results: &[GameResult]) -> Self {
        let mut stats = Self::new(name);
        for result in results {
            match result.winner {
                Some(0) => stats.wins += 1,
                Some(_) => stats.losses += 1,
                None => stats.draws += 1,
            }
            stats.total_games += 1;
            stats.total_turns += result.turns as u64;
            stats.total_think_micros += result.think_micros;
        }
        stats
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_games as f64
        }
    }

    pub fn avg_game_length(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.total_games as f64
        }
    }

    pub fn avg_think_millis(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_think_micros as f64 / self.total_games as f64 / 1000.0
        }
    }
}

/// Tournament statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentStats {
    pub agent_stats: Vec<AgentStats>,
    pub opponent: String,
    pub num_agents: usize,
    pub games_per_agent: u32,
}

impl TournamentStats {
    /// Print a formatted summary table
    pub fn print_summary(&self) {
        use colored::Colorize;
        use tabled::{Table, Tabled};

        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Agent")]
            name: String,
            #[tabled(rename = "Wins")]
            wins: u32,
            #[tabled(rename = "Losses")]
            losses: u32,
            #[tabled(rename = "Draws")]
            draws: u32,
            #[tabled(rename = "Win Rate")]
            win_rate: String,
            #[tabled(rename = "Avg Length")]
            avg_length: String,
            #[tabled(rename = "Think/Game")]
            think: String,
        }

        let rows: Vec<Row> = self
            .agent_stats
            .iter()
            .map(|s| Row {
                name: s.name.clone(),
                wins: s.wins,
                losses: s.losses,
                draws: s.draws,
                win_rate: format!("{:.1}%", s.win_rate() * 100.0),
                avg_length: format!("{:.1}", s.avg_game_length()),
                think: format!("{:.2}ms", s.avg_think_millis()),
            })
            .collect();

        let table = Table::new(rows).to_string();

        println!("\n{}", "=== Tournament Results ===".green().bold());
        println!("{}", table);
        println!();
        println!(
            "Seat 0 vs {} x {} | {} games per agent | fair share {:.1}%",
            (self.num_agents - 1).to_string().cyan(),
            self.opponent.cyan(),
            self.games_per_agent.to_string().cyan(),
            100.0 / self.num_agents as f64
        );
    }

    /// Export stats to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// One strategy at one depth on one tree
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub strategy: String,
    pub depth: u32,
    pub value: Value,
    /// Root action chosen on the first sampled tree
    pub action: Option<String>,
    pub stats: SearchStats,
}

/// Side-by-side search counters, summed over the sampled trees
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub trees: usize,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonStats {
    /// One table row per strategy and depth
    pub fn table(&self) -> String {
        use tabled::{Table, Tabled};

        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Strategy")]
            strategy: String,
            #[tabled(rename = "Depth")]
            depth: u32,
            #[tabled(rename = "Action")]
            action: String,
            #[tabled(rename = "Expanded")]
            expanded: u64,
            #[tabled(rename = "Leaves")]
            leaves: u64,
            #[tabled(rename = "Cutoffs")]
            cutoffs: u64,
            #[tabled(rename = "Mean Value")]
            value: String,
        }

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| Row {
                strategy: r.strategy.clone(),
                depth: r.depth,
                action: r.action.clone().unwrap_or_else(|| "-".to_string()),
                expanded: r.stats.expanded,
                leaves: r.stats.leaves,
                cutoffs: r.stats.cutoffs,
                value: format!("{:.2}", r.value),
            })
            .collect();

        Table::new(rows).to_string()
    }

    pub fn print_summary(&self) {
        use colored::Colorize;

        println!("\n{}", "=== Strategy Comparison ===".green().bold());
        println!("{}", self.table());
        println!("Trees sampled: {}", self.trees.to_string().cyan());
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
