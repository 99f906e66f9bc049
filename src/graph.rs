//! Graph model shared by the search engines.
//!
//! A [`Graph`] bundles:
//! - undirected weighted adjacency (every insert is symmetric)
//! - a heuristic table (absent entries read as "unknown", i.e. [`UNKNOWN_ESTIMATE`])
//! - an AND-OR relation used by the AO* solver
//!
//! The structure is built up front and queried read-only by every search
//! call. Reads never mutate it: `neighbors` on an unknown node yields an
//! empty slice instead of auto-vivifying an entry.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::search::SearchError;

/// Bounds required of a caller-defined node identifier.
///
/// `Ord` supplies the total order used for deterministic neighbor
/// enumeration and tie-breaking.
pub trait NodeKey: Clone + Eq + Hash + Ord + fmt::Debug {}
impl<T: Clone + Eq + Hash + Ord + fmt::Debug> NodeKey for T {}

/// Heuristic value reported for nodes with no recorded estimate.
pub const UNKNOWN_ESTIMATE: u64 = u64::MAX;

/// Source of heuristic estimates (distance-to-goal, lower is better).
///
/// Implemented by [`HeuristicTable`] and by [`FnHeuristic`] for callers that
/// prefer a function over a table.
pub trait HeuristicLike<N> {
    /// Estimated remaining cost from `node` to the goal.
    /// [`UNKNOWN_ESTIMATE`] means "no estimate / presumed unreachable".
    fn estimate(&self, node: &N) -> u64;
}

/// Node-to-estimate table with an "unknown" default.
#[derive(Debug, Clone)]
pub struct HeuristicTable<N> {
    estimates: FxHashMap<N, u64>,
}

impl<N> Default for HeuristicTable<N> {
    fn default() -> Self {
        Self {
            estimates: FxHashMap::default(),
        }
    }
}

impl<N: NodeKey> HeuristicTable<N> {
    pub fn set(&mut self, node: N, estimate: u64) {
        self.estimates.insert(node, estimate);
    }

    pub fn get(&self, node: &N) -> u64 {
        self.estimates.get(node).copied().unwrap_or(UNKNOWN_ESTIMATE)
    }
}

impl<N: NodeKey> HeuristicLike<N> for HeuristicTable<N> {
    fn estimate(&self, node: &N) -> u64 {
        self.get(node)
    }
}

/// Adapter turning a plain function into a [`HeuristicLike`].
#[derive(Debug, Clone, Copy)]
pub struct FnHeuristic<F>(pub F);

impl<N, F: Fn(&N) -> u64> HeuristicLike<N> for FnHeuristic<F> {
    fn estimate(&self, node: &N) -> u64 {
        (self.0)(node)
    }
}

/// One child entry of the AND-OR relation.
///
/// All `is_and` children under the same parent form one AND group: the
/// parent can be resolved through that group only when every member is
/// resolved. `is_and == false` children are OR alternatives, each sufficient
/// on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndOrChild<N> {
    pub child: N,
    pub is_and: bool,
}

#[derive(Debug, Clone)]
pub struct Graph<N> {
    adjacency: FxHashMap<N, Vec<(N, u64)>>,
    heuristics: HeuristicTable<N>,
    and_or: FxHashMap<N, Vec<AndOrChild<N>>>,
    strict: bool,
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> Graph<N> {
    /// Lenient graph: unknown nodes act as isolated (empty neighbor list).
    pub fn new() -> Self {
        Self {
            adjacency: FxHashMap::default(),
            heuristics: HeuristicTable::default(),
            and_or: FxHashMap::default(),
            strict: false,
        }
    }

    /// Strict graph: search entry points reject unknown start/goal nodes
    /// with [`SearchError::NodeNotFound`].
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::new()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Symmetric unit-cost edge. Unknown endpoints are created implicitly.
    pub fn add_edge(&mut self, u: N, v: N) {
        self.insert_directed(u.clone(), v.clone(), 1);
        self.insert_directed(v, u, 1);
    }

    /// Symmetric weighted edge. Re-adding an existing edge replaces its cost
    /// on both directions.
    pub fn add_edge_with_cost(&mut self, u: N, v: N, cost: i64) -> Result<(), SearchError> {
        if cost < 0 {
            return Err(SearchError::InvalidCost { cost });
        }
        let cost = cost as u64;
        self.insert_directed(u.clone(), v.clone(), cost);
        self.insert_directed(v, u, cost);
        Ok(())
    }

    fn insert_directed(&mut self, from: N, to: N, cost: u64) {
        let list = self.adjacency.entry(from).or_default();
        match list.binary_search_by(|(n, _)| n.cmp(&to)) {
            Ok(i) => list[i].1 = cost,
            Err(i) => list.insert(i, (to, cost)),
        }
    }

    /// Stored neighbors in ascending node order; empty for unknown nodes.
    pub fn neighbors(&self, node: &N) -> &[(N, u64)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cost of the stored edge `(u, v)`, if present.
    pub fn edge_cost(&self, u: &N, v: &N) -> Option<u64> {
        let list = self.adjacency.get(u)?;
        let i = list.binary_search_by(|(n, _)| n.cmp(v)).ok()?;
        Some(list[i].1)
    }

    /// Total cost of a node sequence, or `None` if some consecutive pair is
    /// not an edge.
    pub fn path_cost(&self, nodes: &[N]) -> Option<u64> {
        let mut total = 0u64;
        for pair in nodes.windows(2) {
            total = total.saturating_add(self.edge_cost(&pair[0], &pair[1])?);
        }
        Some(total)
    }

    pub fn set_heuristic(&mut self, node: N, estimate: u64) {
        self.heuristics.set(node, estimate);
    }

    pub fn heuristics(&self) -> &HeuristicTable<N> {
        &self.heuristics
    }

    /// Append a child to `parent`'s AND-OR child list (insertion order is
    /// preserved). Unknown nodes are created implicitly.
    pub fn add_and_or_edge(&mut self, parent: N, child: N, is_and: bool) {
        self.and_or
            .entry(parent)
            .or_default()
            .push(AndOrChild { child, is_and });
    }

    /// AND-OR children of `node` in insertion order; empty if it has none.
    pub fn and_or_children(&self, node: &N) -> &[AndOrChild<N>] {
        self.and_or.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn and_or_relation(&self) -> &FxHashMap<N, Vec<AndOrChild<N>>> {
        &self.and_or
    }

    /// Strict-mode endpoint check. Lenient graphs accept any node.
    pub fn ensure_known(&self, stage: &'static str, node: &N) -> Result<(), SearchError> {
        if !self.strict {
            return Ok(());
        }
        if self.adjacency.contains_key(node) || self.and_or.contains_key(node) {
            return Ok(());
        }
        // Nodes appearing only as AND-OR children are known too.
        if self
            .and_or
            .values()
            .any(|children| children.iter().any(|c| c.child == *node))
        {
            return Ok(());
        }
        Err(SearchError::NodeNotFound {
            stage,
            node: format!("{node:?}"),
        })
    }
}
