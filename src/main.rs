use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod board;
mod search;

use board::moves::{MoveRule, SlidingPuzzle};
use board::Board;
use search::{solve, SolveReport, SolverConfig};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "kslide")]
#[command(about = "kslide - parallel k-best solver for sliding-tile puzzles")]
#[command(version)]
struct Args {
    /// Puzzle file: a `rows cols` header followed by rows*cols cell values,
    /// with 0 marking the gap
    puzzle: PathBuf,

    /// Move rule(s) to solve under
    #[arg(long, value_enum, default_value = "both")]
    rule: CliRule,

    /// Number of distinct best solutions to report
    #[arg(short = 'k', long, default_value = "1")]
    solutions: usize,

    /// Number of worker threads (defaults to all logical CPUs)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Wall-clock budget in seconds, 0 = unbounded
    #[arg(long, default_value = "0")]
    time_limit: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// CLI move-rule selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliRule {
    /// The gap swaps with one adjacent tile per move
    AdjacentSwap,
    /// A run of tiles slides into the gap in one move
    BlockShift,
    /// Solve under both rules, one after the other
    Both,
}

impl CliRule {
    fn rules(self) -> Vec<MoveRule> {
        match self {
            CliRule::AdjacentSwap => vec![MoveRule::AdjacentSwap],
            CliRule::BlockShift => vec![MoveRule::BlockShift],
            CliRule::Both => vec![MoveRule::AdjacentSwap, MoveRule::BlockShift],
        }
    }
}

// --- Solve and report ---

fn run_rule(start: &Board, rule: MoveRule, config: &SolverConfig) {
    println!("------------------------------------------");
    println!(
        "Solving under rule: {} ({}x{} board)",
        rule,
        start.rows(),
        start.cols()
    );
    println!("{}", start);

    let model = SlidingPuzzle::new(rule);
    let report = solve(&model, start.clone(), config);

    print_report(&report);
}

fn print_report(report: &SolveReport<Board>) {
    if report.solutions.is_empty() {
        println!("No solutions found.");
    } else {
        for (index, solution) in report.solutions.iter().enumerate() {
            println!("Solution {} (cost: {} steps):", index + 1, solution.cost);
            for step in &solution.path {
                println!("{}", step);
            }
            println!("--------------------");
        }
    }
    println!("States explored: {}", report.stats.states_explored);
    println!("States visited: {}", report.stats.visited_states);
    println!(
        "Time taken: {:.3} seconds",
        report.stats.elapsed.as_secs_f64()
    );
}

// --- Main Function ---

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let text = match fs::read_to_string(&args.puzzle) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading puzzle file {}: {}", args.puzzle.display(), e);
            std::process::exit(1);
        }
    };

    let start: Board = match text.parse() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error parsing puzzle file {}: {}", args.puzzle.display(), e);
            std::process::exit(1);
        }
    };

    let config = SolverConfig::default()
        .with_solutions(args.solutions)
        .with_workers(args.threads.unwrap_or_else(num_cpus::get))
        .with_time_limit_secs(args.time_limit);

    for rule in args.rule.rules() {
        run_rule(&start, rule, &config);
    }
}
