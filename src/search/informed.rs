//! Informed search: greedy best-first and A*.
//!
//! Both take their estimates through [`HeuristicLike`], so callers can pass
//! the graph's own table (`graph.heuristics()`) or any
//! [`crate::graph::FnHeuristic`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{Graph, HeuristicLike, NodeKey};
use crate::search::resources::ResourceTracker;
use crate::search::{FoundPath, PathOutcome, SearchError, SearchOptions};

/// Greedy best-first search: the frontier is ordered purely by the
/// heuristic estimate, ignoring accumulated cost.
///
/// Not optimal: a low estimate can lure the search down an expensive route,
/// and the first path that reaches `goal` is returned as-is. Use [`a_star`]
/// when path cost matters.
pub fn greedy_best_first<N: NodeKey>(
    graph: &Graph<N>,
    h: &impl HeuristicLike<N>,
    start: &N,
    goal: &N,
    opts: &SearchOptions<'_>,
) -> Result<PathOutcome<N>, SearchError> {
    graph.ensure_known("greedy_best_first", start)?;
    graph.ensure_known("greedy_best_first", goal)?;
    let mut tracker = ResourceTracker::new(opts);

    // Ties on the estimate break on the node order, keeping runs reproducible.
    let mut heap: BinaryHeap<Reverse<(u64, N)>> = BinaryHeap::new();
    let mut expanded: FxHashSet<N> = FxHashSet::default();
    let mut parents: FxHashMap<N, (N, u64)> = FxHashMap::default();

    heap.push(Reverse((h.estimate(start), start.clone())));
    tracker.bump_frontier("greedy_best_first", 1)?;

    while let Some(Reverse((_, node))) = heap.pop() {
        if node == *goal {
            return Ok(PathOutcome::Found(reconstruct(&parents, &node)));
        }
        if !expanded.insert(node.clone()) {
            continue;
        }
        tracker.bump_expansions("greedy_best_first", 1)?;

        for (nb, cost) in graph.neighbors(&node) {
            if expanded.contains(nb) {
                continue;
            }
            // First discovery wins the predecessor slot.
            parents
                .entry(nb.clone())
                .or_insert_with(|| (node.clone(), *cost));
            heap.push(Reverse((h.estimate(nb), nb.clone())));
            tracker.bump_frontier("greedy_best_first", 1)?;
        }
    }

    Ok(PathOutcome::Unreachable)
}

/// A* search: the frontier is ordered by `f = g + h`, with `g` the
/// accumulated path cost.
///
/// When a cheaper `g` is found for an already-discovered node, its
/// predecessor and cost are updated and it is re-inserted. The search ends
/// the instant `goal` is popped; with an admissible (never overestimating)
/// heuristic the returned cost is the true shortest-path cost. Unknown
/// estimates read as `u64::MAX`, which, combined with saturating `f`, makes
/// the tie-break fall through to `g`, so an all-unknown table degrades to
/// uniform-cost search rather than misbehaving.
pub fn a_star<N: NodeKey>(
    graph: &Graph<N>,
    h: &impl HeuristicLike<N>,
    start: &N,
    goal: &N,
    opts: &SearchOptions<'_>,
) -> Result<PathOutcome<N>, SearchError> {
    graph.ensure_known("a_star", start)?;
    graph.ensure_known("a_star", goal)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut heap: BinaryHeap<Reverse<(u64, u64, N)>> = BinaryHeap::new();
    let mut g_cost: FxHashMap<N, u64> = FxHashMap::default();
    let mut parents: FxHashMap<N, (N, u64)> = FxHashMap::default();

    g_cost.insert(start.clone(), 0);
    heap.push(Reverse((h.estimate(start), 0, start.clone())));
    tracker.bump_frontier("a_star", 1)?;

    while let Some(Reverse((_, g, node))) = heap.pop() {
        if node == *goal {
            let mut path = reconstruct(&parents, &node);
            path.cost = g;
            return Ok(PathOutcome::Found(path));
        }
        // Stale queue entry superseded by a cheaper rediscovery.
        if g > g_cost.get(&node).copied().unwrap_or(u64::MAX) {
            continue;
        }
        tracker.bump_expansions("a_star", 1)?;

        for (nb, cost) in graph.neighbors(&node) {
            let candidate = g.saturating_add(*cost);
            if candidate < g_cost.get(nb).copied().unwrap_or(u64::MAX) {
                g_cost.insert(nb.clone(), candidate);
                parents.insert(nb.clone(), (node.clone(), *cost));
                let f = candidate.saturating_add(h.estimate(nb));
                heap.push(Reverse((f, candidate, nb.clone())));
                tracker.bump_frontier("a_star", 1)?;
            }
        }
    }

    Ok(PathOutcome::Unreachable)
}

/// Walk predecessor links back from `end` and reverse, summing edge costs.
fn reconstruct<N: NodeKey>(parents: &FxHashMap<N, (N, u64)>, end: &N) -> FoundPath<N> {
    let mut nodes: Vec<N> = vec![end.clone()];
    let mut cost = 0u64;
    let mut cursor = end;
    while let Some((prev, edge)) = parents.get(cursor) {
        cost = cost.saturating_add(*edge);
        nodes.push(prev.clone());
        cursor = prev;
    }
    nodes.reverse();
    FoundPath { nodes, cost }
}
