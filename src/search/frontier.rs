//! Shared min-priority frontier of pending search nodes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Mutex, PoisonError};

/// A discovered-but-not-yet-expanded state with its cost bookkeeping.
///
/// Several nodes for the same state may sit in the frontier at once: the
/// frontier cannot decrease a key in place, so a cheaper rediscovery pushes
/// a fresh node and the stale ones are discarded when popped.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub state: S,
    /// Confirmed cost from the start state when this node was pushed.
    pub g: u32,
    /// Heuristic estimate of the remaining cost.
    pub h: u32,
    /// Total estimate `g + h`, the primary ordering key.
    pub f: u32,
}

impl<S> SearchNode<S> {
    pub fn new(state: S, g: u32, h: u32) -> Self {
        Self {
            state,
            g,
            h,
            f: g + h,
        }
    }
}

impl<S> PartialEq for SearchNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}

impl<S> Eq for SearchNode<S> {}

impl<S> Ord for SearchNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap's max-heap pops the lowest (f, g) first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
    }
}

impl<S> PartialOrd for SearchNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Thread-safe priority frontier ordered by ascending `(f, g)`.
#[derive(Debug)]
pub struct Frontier<S> {
    heap: Mutex<BinaryHeap<SearchNode<S>>>,
}

impl<S> Frontier<S> {
    pub fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
        }
    }

    pub fn push(&self, node: SearchNode<S>) {
        self.lock().push(node);
    }

    /// Pop the current minimum, or None if the frontier is empty right now.
    pub fn try_pop(&self) -> Option<SearchNode<S>> {
        self.lock().pop()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BinaryHeap<SearchNode<S>>> {
        // A poisoned heap is still a valid heap; keep going.
        self.heap.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_f_first() {
        let frontier = Frontier::new();
        frontier.push(SearchNode::new("far", 5, 10));
        frontier.push(SearchNode::new("near", 1, 2));
        frontier.push(SearchNode::new("middle", 4, 4));

        assert_eq!(frontier.try_pop().unwrap().state, "near");
        assert_eq!(frontier.try_pop().unwrap().state, "middle");
        assert_eq!(frontier.try_pop().unwrap().state, "far");
        assert!(frontier.try_pop().is_none());
    }

    #[test]
    fn test_equal_f_breaks_ties_by_lower_g() {
        let frontier = Frontier::new();
        frontier.push(SearchNode::new("deep", 6, 0));
        frontier.push(SearchNode::new("shallow", 2, 4));

        let first = frontier.try_pop().unwrap();
        assert_eq!(first.state, "shallow");
        assert_eq!(first.f, 6);
    }

    #[test]
    fn test_duplicate_states_coexist() {
        let frontier = Frontier::new();
        frontier.push(SearchNode::new("dup", 3, 1));
        frontier.push(SearchNode::new("dup", 2, 1));
        assert_eq!(frontier.len(), 2);

        // The cheaper duplicate comes out first.
        assert_eq!(frontier.try_pop().unwrap().g, 2);
        assert_eq!(frontier.try_pop().unwrap().g, 3);
    }

    #[test]
    fn test_f_is_g_plus_h() {
        let node = SearchNode::new((), 3, 4);
        assert_eq!(node.f, 7);
    }
}
