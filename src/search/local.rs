//! Local search: hill climbing and beam search.
//!
//! Both strategies trade completeness for bounded work per step; neither
//! backtracks. The resource budget is what keeps them from looping on
//! graphs where the heuristic is not strictly improving.

use crate::graph::{Graph, HeuristicLike, NodeKey};
use crate::search::resources::ResourceTracker;
use crate::search::{FoundPath, PathOutcome, SearchError, SearchOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a hill-climbing run.
pub enum ClimbOutcome<N> {
    /// The goal was reached; the full path is included.
    ReachedGoal(Vec<N>),
    /// No neighbor strictly improves on the current estimate; the path so
    /// far is returned rather than discarded.
    LocalOptimum(Vec<N>),
    /// The current node has no neighbors at all.
    NoNeighbors,
}

/// Steepest-ascent hill climbing: always move to the single best neighbor,
/// and only while it strictly improves the estimate.
///
/// Ties between equally-estimated neighbors break on node order. There is
/// no cycle detection; on a graph without a strictly improving route the
/// improvement rule stops the climb at a [`ClimbOutcome::LocalOptimum`],
/// and the expansion budget bounds the walk regardless.
pub fn hill_climbing<N: NodeKey>(
    graph: &Graph<N>,
    h: &impl HeuristicLike<N>,
    start: &N,
    goal: &N,
    opts: &SearchOptions<'_>,
) -> Result<ClimbOutcome<N>, SearchError> {
    graph.ensure_known("hill_climbing", start)?;
    graph.ensure_known("hill_climbing", goal)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut current = start.clone();
    let mut path = vec![current.clone()];
    if current == *goal {
        return Ok(ClimbOutcome::ReachedGoal(path));
    }

    loop {
        tracker.bump_expansions("hill_climbing", 1)?;

        let best = graph
            .neighbors(&current)
            .iter()
            .map(|(nb, _)| (h.estimate(nb), nb))
            .min();
        let Some((best_estimate, best_node)) = best else {
            return Ok(ClimbOutcome::NoNeighbors);
        };

        if best_estimate >= h.estimate(&current) {
            return Ok(ClimbOutcome::LocalOptimum(path));
        }

        current = best_node.clone();
        path.push(current.clone());
        if current == *goal {
            return Ok(ClimbOutcome::ReachedGoal(path));
        }
    }
}

/// Beam search with a fixed level width.
///
/// Each round expands every kept node, sorts the candidate next level by
/// `(estimate, node)` ascending, and keeps the best `width` entries. The
/// goal is recognized when a kept entry is examined; an empty candidate
/// level means the beam has run dry and the goal was never seen.
///
/// `width == 0` is rejected with [`SearchError::InvalidConfiguration`].
/// Pruned routes are never revisited, so the search is incomplete by
/// design; on graphs where the beam can oscillate, the expansion budget is
/// the termination guarantee.
pub fn beam_search<N: NodeKey>(
    graph: &Graph<N>,
    h: &impl HeuristicLike<N>,
    start: &N,
    goal: &N,
    width: usize,
    opts: &SearchOptions<'_>,
) -> Result<PathOutcome<N>, SearchError> {
    if width == 0 {
        return Err(SearchError::InvalidConfiguration {
            reason: "beam width must be at least 1".to_string(),
        });
    }
    graph.ensure_known("beam_search", start)?;
    graph.ensure_known("beam_search", goal)?;
    let mut tracker = ResourceTracker::new(opts);

    // (node, path from start, accumulated cost)
    let mut level: Vec<(N, Vec<N>, u64)> = vec![(start.clone(), vec![start.clone()], 0)];

    while !level.is_empty() {
        let mut next: Vec<(N, Vec<N>, u64)> = Vec::new();

        for (node, path, cost) in &level {
            if node == goal {
                return Ok(PathOutcome::Found(FoundPath {
                    nodes: path.clone(),
                    cost: *cost,
                }));
            }
            tracker.bump_expansions("beam_search", 1)?;

            for (nb, edge) in graph.neighbors(node) {
                let mut extended = path.clone();
                extended.push(nb.clone());
                next.push((nb.clone(), extended, cost.saturating_add(*edge)));
                tracker.bump_frontier("beam_search", 1)?;
            }
        }

        next.sort_by(|a, b| (h.estimate(&a.0), &a.0).cmp(&(h.estimate(&b.0), &b.0)));
        next.truncate(width);
        level = next;
    }

    Ok(PathOutcome::Unreachable)
}
