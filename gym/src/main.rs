use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, ensure};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use gym::nim::{Nim, heuristic};
use gym::{
    Agent, AgentStats, GameConfig, RandomAgent, ReflexAgent, SearchAgent, TournamentStats,
    compare_strategies, run_tournament, run_tournament_parallel,
};
use lib::{GameTree, SearchConfig, StrategyKind};

#[derive(Parser)]
#[command(name = "search-gym")]
#[command(about = "Benchmarking gym for the minimax, alpha-beta and expectimax strategies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Each agent takes seat 0 of a Nim table against the same opponents
    Tournament {
        /// Games per agent
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Agents to seat as the maximizer
        #[arg(short, long, value_delimiter = ',', default_value = "minimax,alphabeta,expectimax,reflex,random")]
        agents: Vec<AgentType>,

        /// Search depth in full rounds
        #[arg(short, long, default_value = "2")]
        depth: u32,

        /// Number of opponents at the table
        #[arg(long, default_value = "2")]
        opponents: usize,

        /// Agent type filling the opponent seats
        #[arg(long, default_value = "random")]
        opponent: OpponentType,

        /// Smallest starting pile
        #[arg(long, default_value = "15")]
        min_stones: u32,

        /// Largest starting pile
        #[arg(long, default_value = "30")]
        max_stones: u32,

        /// Most stones that may be taken per turn
        #[arg(long, default_value = "3")]
        max_take: u32,

        /// Maximum turns per game
        #[arg(long, default_value = "200")]
        max_turns: u32,

        /// Run games in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare search effort of the strategies on random trees
    Compare {
        /// Number of random trees
        #[arg(short, long, default_value = "20")]
        seeds: u64,

        /// Number of agents in each tree
        #[arg(short, long, default_value = "2")]
        agents: usize,

        /// Children per node
        #[arg(short, long, default_value = "3")]
        branching: usize,

        /// Full rounds in each tree
        #[arg(short, long, default_value = "3")]
        rounds: usize,

        /// Deepest search limit to try
        #[arg(long, default_value = "3")]
        max_depth: u32,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq)]
enum AgentType {
    Minimax,
    #[value(alias = "alpha-beta")]
    Alphabeta,
    Expectimax,
    Reflex,
    Random,
}

impl AgentType {
    fn create_agent(&self, depth: u32) -> Box<dyn Agent<Nim>> {
        let search = |strategy| -> Box<dyn Agent<Nim>> {
            Box::new(SearchAgent::new(SearchConfig::new(strategy, depth), heuristic))
        };
        match self {
            AgentType::Minimax => search(StrategyKind::Minimax),
            AgentType::Alphabeta => search(StrategyKind::AlphaBeta),
            AgentType::Expectimax => search(StrategyKind::Expectimax),
            AgentType::Reflex => Box::new(ReflexAgent::new(heuristic)),
            AgentType::Random => Box::new(RandomAgent::new()),
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq)]
enum OpponentType {
    Random,
    Reflex,
}

impl OpponentType {
    fn create_agent(&self) -> Box<dyn Agent<Nim>> {
        match self {
            OpponentType::Random => Box::new(RandomAgent::new()),
            OpponentType::Reflex => Box::new(ReflexAgent::new(heuristic)),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tournament {
            games,
            agents,
            depth,
            opponents,
            opponent,
            min_stones,
            max_stones,
            max_take,
            max_turns,
            parallel,
            json,
        } => {
            ensure!(depth > 0, "depth must be at least 1");
            ensure!(min_stones <= max_stones, "min-stones exceeds max-stones");
            let config = GameConfig {
                min_stones,
                max_stones,
                max_take,
                num_agents: opponents + 1,
                max_turns,
            };
            run_tournament_cmd(games, &agents, depth, opponent, &config, parallel, json)
        }
        Commands::Compare {
            seeds,
            agents,
            branching,
            rounds,
            max_depth,
            json,
        } => {
            ensure!(agents > 0 && branching > 0, "trees need agents and children");
            run_compare_cmd(seeds, agents, branching, rounds, max_depth, json)
        }
    }
}

fn progress_bar(len: u64, label: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {label:<14} [{{bar:30.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
            ))?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn run_tournament_cmd(
    num_games: usize,
    agent_types: &[AgentType],
    depth: u32,
    opponent_type: OpponentType,
    config: &GameConfig,
    parallel: bool,
    json_output: bool,
) -> Result<()> {
    if !json_output {
        println!("\n{}", "=== Search Gym Tournament ===".green().bold());
        println!(
            "Games: {} | Seats: {} | Stones: {}..={} | Max take: {}",
            num_games, config.num_agents, config.min_stones, config.max_stones, config.max_take
        );
        println!("Parallel: {} | Depth: {}", parallel, depth);
        println!();
    }

    let opponent = opponent_type.create_agent();
    let opponent = &*opponent;
    let mut agent_stats = Vec::with_capacity(agent_types.len());

    for agent_type in agent_types {
        let agent = agent_type.create_agent(depth);
        let agent = &*agent;
        let mut seats: Vec<&dyn Agent<Nim>> = vec![agent];
        seats.extend(std::iter::repeat_n(opponent, config.num_agents - 1));

        let pb = if json_output {
            None
        } else {
            Some(progress_bar(num_games as u64, agent.name())?)
        };

        let results = if parallel {
            run_tournament_parallel(&seats, config, num_games, pb.as_ref())?
        } else {
            run_tournament(&seats, config, num_games, pb.as_ref())?
        };

        if let Some(pb) = pb {
            pb.finish();
        }
        agent_stats.push(AgentStats::from_results(agent.name().to_string(), &results));
    }

    let stats = TournamentStats {
        agent_stats,
        opponent: opponent.name().to_string(),
        num_agents: config.num_agents,
        games_per_agent: num_games as u32,
    };

    if json_output {
        println!("{}", stats.to_json());
    } else {
        stats.print_summary();
    }
    Ok(())
}

fn run_compare_cmd(
    seeds: u64,
    agents: usize,
    branching: usize,
    rounds: usize,
    max_depth: u32,
    json_output: bool,
) -> Result<()> {
    let trees: Vec<GameTree> = (0..seeds)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            GameTree::random(agents, branching, rounds, 0.05, &mut rng)
        })
        .collect();

    let comparison = compare_strategies(&trees, max_depth)?;

    if json_output {
        println!("{}", comparison.to_json());
    } else {
        comparison.print_summary();
    }
    Ok(())
}
