//! Shared mutable state the worker threads cooperate through.
//!
//! All of it is rebuilt for every `solve` invocation. The frontier and the
//! two tables are internally synchronized and never held across an
//! expansion; only the solution set sits behind a mutex, with critical
//! sections kept to an insert or a size probe.

use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::search::frontier::{Frontier, SearchNode};
use crate::search::solution::SolutionSet;

/// States are small values that hash cheaply, so skip SipHash.
type FxDashMap<K, V> = DashMap<K, V, FxBuildHasher>;

/// The concurrent structures one search invocation runs over.
#[derive(Debug)]
pub struct SharedSearch<S: Eq + Ord + Hash> {
    pub frontier: Frontier<S>,
    /// Minimum confirmed cost-so-far per state. Values only ever decrease.
    best_costs: FxDashMap<S, u32>,
    /// State that produced the best-known path to each key.
    parents: FxDashMap<S, S>,
    solutions: Mutex<SolutionSet<S>>,
    terminate: AtomicBool,
    explored: AtomicU64,
}

impl<S: Clone + Eq + Ord + Hash> SharedSearch<S> {
    pub fn new() -> Self {
        Self {
            frontier: Frontier::new(),
            best_costs: DashMap::with_hasher(FxBuildHasher),
            parents: DashMap::with_hasher(FxBuildHasher),
            solutions: Mutex::new(SolutionSet::new()),
            terminate: AtomicBool::new(false),
            explored: AtomicU64::new(0),
        }
    }

    /// Record the start state at cost 0 and queue its node. The start has no
    /// parent link; path reconstruction stops when it reaches it.
    pub fn seed(&self, start: S, h: u32) {
        self.best_costs.insert(start.clone(), 0);
        self.frontier.push(SearchNode::new(start, 0, h));
    }

    /// Try to record `g` as the cost of reaching `state` via `parent`.
    ///
    /// Succeeds when the state is unseen or `g` beats the recorded cost, in
    /// which case the parent link is rewritten and the caller should push a
    /// fresh frontier node. The parent write is not atomic with the cost
    /// write: a racing worker can briefly pair a cost with another path's
    /// parent. That window closes once all workers have joined, which is why
    /// reconstruction only runs after the search completes.
    pub fn improve(&self, state: &S, g: u32, parent: &S) -> bool {
        let improved = match self.best_costs.entry(state.clone()) {
            Entry::Occupied(mut slot) => {
                if g < *slot.get() {
                    *slot.get_mut() = g;
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(g);
                true
            }
        };
        if improved {
            self.parents.insert(state.clone(), parent.clone());
        }
        improved
    }

    /// Whether a cheaper path to `state` than `g` has already been confirmed.
    pub fn is_stale(&self, state: &S, g: u32) -> bool {
        self.best_costs.get(state).is_some_and(|best| *best < g)
    }

    pub fn parent_of(&self, state: &S) -> Option<S> {
        self.parents.get(state).map(|parent| parent.value().clone())
    }

    /// Number of states with a confirmed cost.
    pub fn visited_states(&self) -> usize {
        self.best_costs.len()
    }

    pub fn parent_links(&self) -> usize {
        self.parents.len()
    }

    /// Run `f` with exclusive access to the solution set.
    pub fn with_solutions<R>(&self, f: impl FnOnce(&mut SolutionSet<S>) -> R) -> R {
        f(&mut self.lock_solutions())
    }

    fn lock_solutions(&self) -> MutexGuard<'_, SolutionSet<S>> {
        self.solutions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask every worker to stop after its current iteration.
    pub fn signal_stop(&self) {
        self.terminate.store(true, Ordering::SeqCst);
    }

    pub fn should_stop(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }

    /// Count one popped node; returns the running total.
    pub fn count_explored(&self) -> u64 {
        self.explored.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn states_explored(&self) -> u64 {
        self.explored.load(Ordering::Relaxed)
    }
}

impl<S: Clone + Eq + Ord + Hash> Default for SharedSearch<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::solution::Solution;

    #[test]
    fn test_seed_records_start_at_zero() {
        let shared = SharedSearch::new();
        shared.seed("start", 3);
        assert!(!shared.is_stale(&"start", 0));
        assert!(shared.is_stale(&"start", 1));

        let node = shared.frontier.try_pop().unwrap();
        assert_eq!(node.state, "start");
        assert_eq!(node.g, 0);
        assert_eq!(node.f, 3);
    }

    #[test]
    fn test_improve_first_sighting_succeeds() {
        let shared = SharedSearch::new();
        assert!(shared.improve(&"a", 4, &"start"));
        assert_eq!(shared.parent_of(&"a"), Some("start"));
    }

    #[test]
    fn test_improve_rejects_equal_or_worse_cost() {
        let shared = SharedSearch::new();
        assert!(shared.improve(&"a", 4, &"start"));
        assert!(!shared.improve(&"a", 4, &"other"));
        assert!(!shared.improve(&"a", 7, &"other"));
        // Rejected updates leave the parent link alone.
        assert_eq!(shared.parent_of(&"a"), Some("start"));
    }

    #[test]
    fn test_improve_decreases_cost_and_rewrites_parent() {
        let shared = SharedSearch::new();
        assert!(shared.improve(&"a", 4, &"long_way"));
        assert!(shared.improve(&"a", 2, &"short_way"));
        assert_eq!(shared.parent_of(&"a"), Some("short_way"));
        assert!(shared.is_stale(&"a", 4));
        assert!(!shared.is_stale(&"a", 2));
    }

    #[test]
    fn test_unseen_state_is_never_stale() {
        let shared: SharedSearch<&str> = SharedSearch::new();
        assert!(!shared.is_stale(&"nowhere", 99));
    }

    #[test]
    fn test_stop_flag_and_counter() {
        let shared: SharedSearch<&str> = SharedSearch::new();
        assert!(!shared.should_stop());
        shared.signal_stop();
        assert!(shared.should_stop());

        assert_eq!(shared.count_explored(), 1);
        assert_eq!(shared.count_explored(), 2);
        assert_eq!(shared.states_explored(), 2);
    }

    #[test]
    fn test_with_solutions_gives_exclusive_access() {
        let shared: SharedSearch<&str> = SharedSearch::new();
        let len = shared.with_solutions(|set| {
            set.insert(Solution {
                cost: 1,
                path: vec!["start", "goal"],
            });
            set.len()
        });
        assert_eq!(len, 1);
        assert_eq!(shared.with_solutions(|set| set.kth_cost(1)), Some(1));
    }
}
