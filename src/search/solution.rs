//! Completed solutions, deduplicated and ordered by cost.

use std::collections::BTreeSet;

/// A completed path from the start state to a goal state.
///
/// The derived ordering (cost first, then the path lexicographically) is
/// also the uniqueness key: re-inserting an identical solution collapses
/// into one entry, while equal-cost solutions through different states stay
/// distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Solution<S> {
    /// Total cost of the path.
    pub cost: u32,
    /// Every state visited, start and goal inclusive.
    pub path: Vec<S>,
}

/// Cost-ordered, deduplicated collection of solutions found so far.
///
/// Callers must hold exclusive access while inserting or reading; the engine
/// keeps it behind a mutex and keeps the critical sections short.
#[derive(Debug, Default)]
pub struct SolutionSet<S: Ord> {
    found: BTreeSet<Solution<S>>,
}

impl<S: Ord> SolutionSet<S> {
    pub fn new() -> Self {
        Self {
            found: BTreeSet::new(),
        }
    }

    /// Insert a solution; returns false if an identical one was already
    /// recorded.
    pub fn insert(&mut self, solution: Solution<S>) -> bool {
        self.found.insert(solution)
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// Cost of the k-th best solution (1-based), if at least k exist.
    pub fn kth_cost(&self, k: usize) -> Option<u32> {
        if k == 0 {
            return None;
        }
        self.found.iter().nth(k - 1).map(|solution| solution.cost)
    }
}

impl<S: Ord + Clone> SolutionSet<S> {
    /// The best `k` solutions in order.
    pub fn top(&self, k: usize) -> Vec<Solution<S>> {
        self.found.iter().take(k).cloned().collect()
    }
}
