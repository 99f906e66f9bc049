//! Uninformed search: BFS, DFS, depth-limited DFS, iterative deepening and
//! bidirectional search.
//!
//! Neighbor enumeration follows the graph's stored ascending node order, so
//! every routine here is deterministic for a given graph.
//!
//! All traversals use explicit stacks/queues; recursion depth never depends
//! on the size of the caller's graph.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{Graph, NodeKey};
use crate::search::resources::ResourceTracker;
use crate::search::{FoundPath, PathOutcome, SearchError, SearchOptions};

/// Breadth-first visitation sequence from `start`.
///
/// Nodes appear in non-decreasing hop-distance order; each node once. This
/// reports visitation only; callers that need a path should use
/// [`bfs_tree`] and walk the predecessor links.
pub fn bfs<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    opts: &SearchOptions<'_>,
) -> Result<Vec<N>, SearchError> {
    graph.ensure_known("bfs", start)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut visited: FxHashSet<N> = FxHashSet::default();
    let mut queue: VecDeque<N> = VecDeque::new();
    let mut order: Vec<N> = Vec::new();

    visited.insert(start.clone());
    queue.push_back(start.clone());
    tracker.bump_frontier("bfs", 1)?;

    while let Some(node) = queue.pop_front() {
        tracker.bump_expansions("bfs", 1)?;
        for (nb, _) in graph.neighbors(&node) {
            if visited.insert(nb.clone()) {
                tracker.bump_frontier("bfs", 1)?;
                queue.push_back(nb.clone());
            }
        }
        order.push(node);
    }

    Ok(order)
}

/// Breadth-first predecessor tree from `start`.
///
/// Maps each reached node (except `start`) to the node it was first
/// discovered from; walking the links back to `start` yields a
/// fewest-hops path.
pub fn bfs_tree<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    opts: &SearchOptions<'_>,
) -> Result<FxHashMap<N, N>, SearchError> {
    graph.ensure_known("bfs_tree", start)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut parents: FxHashMap<N, N> = FxHashMap::default();
    let mut visited: FxHashSet<N> = FxHashSet::default();
    let mut queue: VecDeque<N> = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start.clone());
    tracker.bump_frontier("bfs_tree", 1)?;

    while let Some(node) = queue.pop_front() {
        tracker.bump_expansions("bfs_tree", 1)?;
        for (nb, _) in graph.neighbors(&node) {
            if visited.insert(nb.clone()) {
                tracker.bump_frontier("bfs_tree", 1)?;
                parents.insert(nb.clone(), node.clone());
                queue.push_back(nb.clone());
            }
        }
    }

    Ok(parents)
}

/// Depth-first visitation sequence from `start`, post-order of return:
/// a node appears after all nodes first reached through it, and `start`
/// appears last.
///
/// Nodes are marked visited before descent, so cycles are safe.
pub fn dfs<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    opts: &SearchOptions<'_>,
) -> Result<Vec<N>, SearchError> {
    graph.ensure_known("dfs", start)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut visited: FxHashSet<N> = FxHashSet::default();
    let mut order: Vec<N> = Vec::new();
    // Frames carry the index of the next neighbor to try.
    let mut stack: Vec<(N, usize)> = Vec::new();

    visited.insert(start.clone());
    stack.push((start.clone(), 0));
    tracker.bump_expansions("dfs", 1)?;

    while let Some(frame) = stack.last_mut() {
        let node = frame.0.clone();
        let next_index = frame.1;
        let neighbors = graph.neighbors(&node);

        if next_index < neighbors.len() {
            frame.1 += 1;
            let next = neighbors[next_index].0.clone();
            if visited.insert(next.clone()) {
                tracker.bump_expansions("dfs", 1)?;
                stack.push((next, 0));
            }
        } else {
            order.push(node);
            stack.pop();
        }
    }

    Ok(order)
}

/// Depth-bounded reachability check: is `target` within `limit` edges of
/// `start`?
///
/// Tracks no visited set: the depth bound alone guarantees
/// termination, and revisits are required for correctness when a short
/// route shares nodes with a longer one. Work is bounded by the runtime-step
/// budget.
pub fn depth_limited_dfs<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    target: &N,
    limit: u32,
    opts: &SearchOptions<'_>,
) -> Result<bool, SearchError> {
    graph.ensure_known("depth_limited_dfs", start)?;
    graph.ensure_known("depth_limited_dfs", target)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut stack: Vec<(N, u32)> = vec![(start.clone(), limit)];

    while let Some((node, remaining)) = stack.pop() {
        tracker.bump_steps("depth_limited_dfs", 1)?;
        if node == *target {
            return Ok(true);
        }
        if remaining == 0 {
            continue;
        }
        // Reverse push so the lowest-ordered neighbor is explored first.
        for (nb, _) in graph.neighbors(&node).iter().rev() {
            stack.push((nb.clone(), remaining - 1));
        }
    }

    Ok(false)
}

/// Iterative deepening: depth-limited DFS at depths `0..=max_depth`.
///
/// Returns the first depth at which `target` was found, or `None` when
/// every depth up to `max_depth` fails.
pub fn iterative_deepening<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    target: &N,
    max_depth: u32,
    opts: &SearchOptions<'_>,
) -> Result<Option<u32>, SearchError> {
    for depth in 0..=max_depth {
        if depth_limited_dfs(graph, start, target, depth, opts)? {
            return Ok(Some(depth));
        }
    }
    Ok(None)
}

/// Bidirectional search: two BFS frontiers grown level by level in
/// alternation.
///
/// A node discovered by both sides is only a candidate meeting point. The
/// first candidate is not necessarily on a shortest route (the deeper side
/// can touch a decoy first), so the search keeps the candidate with the
/// smallest combined hop count and returns it once the two completed depths
/// together rule out anything shorter. On unweighted graphs (all unit costs)
/// the returned path length therefore matches single-source BFS distance.
///
/// The returned path concatenates the start-side route to the meeting point
/// with the reversed goal-side route.
pub fn bidirectional<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    opts: &SearchOptions<'_>,
) -> Result<PathOutcome<N>, SearchError> {
    graph.ensure_known("bidirectional", start)?;
    graph.ensure_known("bidirectional", goal)?;
    let mut tracker = ResourceTracker::new(opts);

    if start == goal {
        return Ok(PathOutcome::Found(FoundPath {
            nodes: vec![start.clone()],
            cost: 0,
        }));
    }

    // Each side maps a discovered node to its hop depth and its
    // (predecessor, edge cost); the roots have no predecessor.
    let mut from_start: FxHashMap<N, (u64, Option<(N, u64)>)> = FxHashMap::default();
    let mut from_goal: FxHashMap<N, (u64, Option<(N, u64)>)> = FxHashMap::default();
    from_start.insert(start.clone(), (0, None));
    from_goal.insert(goal.clone(), (0, None));

    let mut level_start: Vec<N> = vec![start.clone()];
    let mut level_goal: Vec<N> = vec![goal.clone()];
    let mut depth_start = 0u64;
    let mut depth_goal = 0u64;
    tracker.bump_frontier("bidirectional", 2)?;

    // Cheapest meeting candidate so far, by combined hop count.
    let mut best: Option<(u64, N)> = None;
    let mut start_turn = true;

    while !level_start.is_empty() || !level_goal.is_empty() {
        // Every node at hop distance <= depth_start (resp. depth_goal) from
        // its root is already discovered, so any route of combined length
        // <= depth_start + depth_goal has produced a candidate by now.
        if let Some((total, meet)) = &best {
            if *total <= depth_start + depth_goal {
                return Ok(PathOutcome::Found(stitch(meet, &from_start, &from_goal)));
            }
        }

        let expand_start = if level_start.is_empty() {
            false
        } else if level_goal.is_empty() {
            true
        } else {
            start_turn
        };
        start_turn = !start_turn;

        if expand_start {
            depth_start += 1;
            advance_level(
                graph,
                &mut tracker,
                &mut level_start,
                depth_start,
                &mut from_start,
                &from_goal,
                &mut best,
            )?;
        } else {
            depth_goal += 1;
            advance_level(
                graph,
                &mut tracker,
                &mut level_goal,
                depth_goal,
                &mut from_goal,
                &from_start,
                &mut best,
            )?;
        }
    }

    match best {
        Some((_, meet)) => Ok(PathOutcome::Found(stitch(&meet, &from_start, &from_goal))),
        None => Ok(PathOutcome::Unreachable),
    }
}

/// Expand one whole frontier level, recording any newly discovered node the
/// other side already knows as a meeting candidate.
fn advance_level<N: NodeKey>(
    graph: &Graph<N>,
    tracker: &mut ResourceTracker<'_>,
    level: &mut Vec<N>,
    next_depth: u64,
    own: &mut FxHashMap<N, (u64, Option<(N, u64)>)>,
    other: &FxHashMap<N, (u64, Option<(N, u64)>)>,
    best: &mut Option<(u64, N)>,
) -> Result<(), SearchError> {
    let mut next: Vec<N> = Vec::new();

    for node in level.drain(..) {
        tracker.bump_expansions("bidirectional", 1)?;
        for (nb, cost) in graph.neighbors(&node) {
            if own.contains_key(nb) {
                continue;
            }
            own.insert(nb.clone(), (next_depth, Some((node.clone(), *cost))));
            tracker.bump_frontier("bidirectional", 1)?;
            next.push(nb.clone());

            if let Some((their_depth, _)) = other.get(nb) {
                let total = next_depth + their_depth;
                let improves = match best {
                    Some((b, _)) => total < *b,
                    None => true,
                };
                if improves {
                    *best = Some((total, nb.clone()));
                }
            }
        }
    }

    *level = next;
    Ok(())
}

/// Concatenate start-side and goal-side predecessor chains at `meet`.
fn stitch<N: NodeKey>(
    meet: &N,
    from_start: &FxHashMap<N, (u64, Option<(N, u64)>)>,
    from_goal: &FxHashMap<N, (u64, Option<(N, u64)>)>,
) -> FoundPath<N> {
    let mut cost = 0u64;

    let mut head: Vec<N> = vec![meet.clone()];
    let mut cursor = meet;
    while let Some((_, Some((prev, edge)))) = from_start.get(cursor) {
        cost = cost.saturating_add(*edge);
        head.push(prev.clone());
        cursor = prev;
    }
    head.reverse();

    let mut cursor = meet;
    while let Some((_, Some((next, edge)))) = from_goal.get(cursor) {
        cost = cost.saturating_add(*edge);
        head.push(next.clone());
        cursor = next;
    }

    FoundPath { nodes: head, cost }
}
