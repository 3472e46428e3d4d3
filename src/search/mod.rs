//! Concurrent k-best best-first search.
//!
//! The engine runs N symmetric worker threads over shared search state: a
//! min-priority frontier, a best-cost table, a parent-link table and a
//! deduplicated solution set. Workers pop the cheapest pending node, prune
//! against the k-th best known solution, discard nodes made stale by a
//! cheaper confirmed path, and either record a solution or expand the node's
//! successors. There is no global lock on the hot path; decrease-key is
//! emulated by pushing duplicate nodes and discarding stale ones on pop.
//!
//! # Example
//!
//! ```ignore
//! use crate::search::{solve, SolverConfig};
//!
//! let config = SolverConfig::default()
//!     .with_solutions(3)
//!     .with_workers(8)
//!     .with_time_limit(Duration::from_secs(60));
//!
//! let report = solve(&model, start, &config);
//! ```

pub mod config;
pub mod engine;
pub mod frontier;
pub mod shared;
pub mod solution;

pub use config::SolverConfig;
pub use engine::{solve, SearchStats, SolveError, SolveReport};
pub use solution::Solution;

use std::fmt::Debug;
use std::hash::Hash;

/// Contract a problem domain must satisfy to be searched.
///
/// States are immutable values: successor generation always produces fresh
/// states and is recomputed on every call, never cached. The `Ord` bound
/// gives equal-cost solutions a stable tie-break order.
pub trait SearchSpace: Sync {
    type State: Clone + Eq + Ord + Hash + Debug + Send + Sync;

    /// Whether the state is a goal. Total, side-effect free.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Lower-bound estimate of the remaining cost to a goal. Search returns
    /// cost-minimal first solutions only if this never overestimates.
    fn heuristic(&self, state: &Self::State) -> u32;

    /// Finite set of `(successor, step_cost)` pairs reachable in one
    /// transition.
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, u32)>;
}
