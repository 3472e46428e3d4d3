//! Worker pool driving the k-best search.
//!
//! `solve` seeds the shared state with the start configuration, launches a
//! pool of symmetric workers, joins them and drains the solution set. Each
//! worker runs the same loop: pop the cheapest node, check the deadline,
//! prune against the k-th best known cost, discard stale nodes, record goals
//! and expand everything else. Termination is cooperative through a single
//! atomic flag, so a worker finishes its current pop/expand cycle before it
//! notices a stop request; with a time limit set, the overrun is bounded by
//! one expansion.
//!
//! Once k solutions exist the flag is raised immediately instead of draining
//! every frontier node that could still tie the k-th cost. The search exits
//! promptly, but the k-th (or better) result is not guaranteed optimal when
//! many equal-cost branches are still pending.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::search::config::SolverConfig;
use crate::search::frontier::SearchNode;
use crate::search::shared::SharedSearch;
use crate::search::solution::Solution;
use crate::search::SearchSpace;

/// Consistency violations detected while walking parent links backward.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("no parent link recorded for a non-start state during path reconstruction")]
    MissingParent,
    #[error("parent links did not reach the start state within {0} steps")]
    UnterminatedPath(usize),
}

/// Counters describing one `solve` invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Nodes popped from the frontier across all workers.
    pub states_explored: u64,
    /// Distinct states with a confirmed cost when the search ended.
    pub visited_states: usize,
    /// Wall time from launch to the last worker joining.
    pub elapsed: Duration,
    /// Whether the search stopped before exhausting the frontier, either on
    /// the deadline or after finding k solutions.
    pub stopped_early: bool,
}

/// Solutions and statistics returned by [`solve`].
#[derive(Debug, Clone)]
pub struct SolveReport<S> {
    /// Up to k solutions, best first.
    pub solutions: Vec<Solution<S>>,
    pub stats: SearchStats,
}

/// Find up to `config.solutions` lowest-cost paths from `start` to a goal of
/// `model`, using `config.num_workers` cooperating threads.
///
/// Returns an empty solution list when no goal is reached before the
/// frontier empties or the deadline elapses; that is a normal outcome.
pub fn solve<M: SearchSpace>(
    model: &M,
    start: M::State,
    config: &SolverConfig,
) -> SolveReport<M::State> {
    info!(
        workers = config.num_workers,
        k = config.solutions,
        "starting search"
    );
    match config.time_limit {
        Some(limit) => info!(limit_secs = limit.as_secs_f64(), "time limit set"),
        None => info!("no time limit set"),
    }

    let shared = SharedSearch::new();
    shared.seed(start.clone(), model.heuristic(&start));
    let started = Instant::now();

    std::thread::scope(|scope| {
        for _ in 0..config.num_workers {
            let shared = &shared;
            let start = &start;
            scope.spawn(move || worker_loop(model, start, shared, config, started));
        }
    });

    let elapsed = started.elapsed();
    let stopped_early = shared.should_stop();
    if stopped_early {
        warn!("search stopped before the frontier was exhausted");
    }

    let solutions = shared.with_solutions(|set| set.top(config.solutions));
    let stats = SearchStats {
        states_explored: shared.states_explored(),
        visited_states: shared.visited_states(),
        elapsed,
        stopped_early,
    };
    info!(
        explored = stats.states_explored,
        visited = stats.visited_states,
        found = solutions.len(),
        elapsed_secs = elapsed.as_secs_f64(),
        "search finished"
    );

    SolveReport { solutions, stats }
}

/// The loop every worker thread runs until the frontier is observed empty or
/// the termination flag is raised.
fn worker_loop<M: SearchSpace>(
    model: &M,
    start: &M::State,
    shared: &SharedSearch<M::State>,
    config: &SolverConfig,
    started: Instant,
) {
    let mut last_progress = Instant::now();

    while !shared.should_stop() {
        // An empty frontier here may be transient while another worker is
        // mid-expansion; that worker (or the deadline) ends the search.
        let Some(node) = shared.frontier.try_pop() else {
            break;
        };
        let explored = shared.count_explored();

        if last_progress.elapsed() >= config.progress_interval {
            info!(
                explored,
                frontier = shared.frontier.len(),
                visited = shared.visited_states(),
                "search progress"
            );
            last_progress = Instant::now();
        }

        if let Some(limit) = config.time_limit {
            if started.elapsed() >= limit {
                warn!(
                    limit_secs = limit.as_secs_f64(),
                    "time limit reached, stopping all workers"
                );
                shared.signal_stop();
                break;
            }
        }

        // Once k solutions exist, a node whose estimate already matches or
        // exceeds the k-th best cost cannot lead anywhere better.
        let bound = shared.with_solutions(|set| set.kth_cost(config.solutions));
        if bound.is_some_and(|kth_cost| node.f >= kth_cost) {
            continue;
        }

        // A cheaper path to this state was confirmed after the node was
        // pushed; the node is stale.
        if shared.is_stale(&node.state, node.g) {
            continue;
        }

        if model.is_goal(&node.state) {
            record_solution(shared, &node, start, config.solutions);
            continue;
        }

        for (successor, step_cost) in model.successors(&node.state) {
            let g = node.g + step_cost;
            if shared.improve(&successor, g, &node.state) {
                let h = model.heuristic(&successor);
                shared.frontier.push(SearchNode::new(successor, g, h));
            }
        }
    }
}

/// Reconstruct the popped goal's path and add it to the solution set,
/// raising the termination flag once k solutions are known.
fn record_solution<S: Clone + Eq + Ord + std::hash::Hash>(
    shared: &SharedSearch<S>,
    node: &SearchNode<S>,
    start: &S,
    k: usize,
) {
    let path = match reconstruct_path(shared, &node.state, start) {
        Ok(path) => path,
        Err(err) => {
            error!(%err, "path reconstruction failed, dropping this solution");
            return;
        }
    };
    if path.len() as u64 != u64::from(node.g) + 1 {
        // The parent chain was rewritten between the cost update and this
        // pop, so it no longer matches the popped cost. The chain's own
        // cost is (or will be) recorded by another pop of this goal.
        warn!(
            cost = node.g,
            path_len = path.len(),
            "dropping solution whose parent chain disagrees with its cost"
        );
        return;
    }

    let total = shared.with_solutions(|set| {
        set.insert(Solution {
            cost: node.g,
            path,
        });
        set.len()
    });
    info!(cost = node.g, total, "solution found");
    if total >= k {
        shared.signal_stop();
    }
}

/// Walk parent links backward from `goal` to `start` and return the path in
/// start-to-goal order.
///
/// The walk is bounded by the number of recorded parent links: a genuine
/// path visits each linked state at most once, so running out of budget
/// means the links form a cycle and the reconstruction is aborted instead of
/// looping forever.
fn reconstruct_path<S: Clone + Eq + Ord + std::hash::Hash>(
    shared: &SharedSearch<S>,
    goal: &S,
    start: &S,
) -> Result<Vec<S>, SolveError> {
    let budget = shared.parent_links() + 1;
    let mut remaining = budget;
    let mut path = vec![goal.clone()];
    let mut current = goal.clone();

    while current != *start {
        if remaining == 0 {
            return Err(SolveError::UnterminatedPath(budget));
        }
        remaining -= 1;
        match shared.parent_of(&current) {
            Some(parent) => {
                current = parent;
                path.push(current.clone());
            }
            None => return Err(SolveError::MissingParent),
        }
    }

    path.reverse();
    Ok(path)
}
