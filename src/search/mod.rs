//! Shared vocabulary for the search engines.
//!
//! Every engine reports three kinds of results, kept strictly apart:
//! - ordinary outcomes, including "searched exhaustively, nothing there"
//!   ([`PathOutcome::Unreachable`] and friends): plain values, never errors
//! - configuration and contract violations ([`SearchError`]), surfaced
//!   immediately to the caller
//! - budget exhaustion and cancellation, also [`SearchError`], so runaway
//!   searches stop instead of looping

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod andor;
pub mod informed;
pub mod local;
pub mod resources;
pub mod uninformed;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// Search budgets used to bound work and memory.
///
/// These are counter budgets, not exact byte limits, but they correlate
/// strongly with allocation and runtime:
/// - `max_expansions`: nodes taken off a frontier and expanded
/// - `max_frontier_nodes`: nodes admitted to frontiers / candidate levels
/// - `max_runtime_steps`: generic loop-iteration guard
/// - `max_depth`: recursion depth cap for the adversarial engine
pub struct SearchLimits {
    pub max_expansions: u64,
    pub max_frontier_nodes: u64,
    pub max_runtime_steps: u64,
    pub max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: 10_000_000,
            max_frontier_nodes: 50_000_000,
            max_runtime_steps: 200_000_000,
            max_depth: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
/// Running counters tracked during a search.
pub struct ResourceCounts {
    pub expansions: u64,
    pub frontier_nodes: u64,
    pub runtime_steps: u64,
}

#[derive(Debug)]
/// Structured errors returned by search routines.
pub enum SearchError {
    /// The request is internally inconsistent (e.g. zero beam width,
    /// malformed AND-OR entry).
    InvalidConfiguration { reason: String },
    /// A negative edge cost was supplied.
    InvalidCost { cost: i64 },
    /// Strict-mode graphs only: an endpoint is absent from the graph.
    NodeNotFound { stage: &'static str, node: String },
    /// The AND-OR plan references a node as its own (transitive) prerequisite.
    CycleDetected { node: String },
    /// Recursion exceeded `SearchLimits::max_depth`.
    DepthLimitExceeded { limit: u32 },
    /// A configured resource limit was exceeded.
    LimitExceeded {
        stage: &'static str,
        metric: &'static str,
        limit: u64,
        observed: u64,
        counts: ResourceCounts,
    },
    /// The caller's cancellation predicate fired.
    Cancelled { stage: &'static str },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            SearchError::InvalidCost { cost } => {
                write!(f, "invalid edge cost {cost}: costs must be non-negative")
            }
            SearchError::NodeNotFound { stage, node } => {
                write!(f, "node {node} not found (strict mode) at {stage}")
            }
            SearchError::CycleDetected { node } => {
                write!(f, "AND-OR plan cycle through node {node}")
            }
            SearchError::DepthLimitExceeded { limit } => {
                write!(f, "search depth exceeded the configured limit {limit}")
            }
            SearchError::LimitExceeded {
                stage,
                metric,
                limit,
                observed,
                counts,
            } => write!(
                f,
                "limit exceeded at {stage}: {metric} (limit={limit}, observed={observed}); \
                 counts(expansions={}, frontier_nodes={}, runtime_steps={})",
                counts.expansions, counts.frontier_nodes, counts.runtime_steps
            ),
            SearchError::Cancelled { stage } => write!(f, "search cancelled at {stage}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Budgets plus an optional cancellation predicate.
///
/// The predicate is polled once per node expansion; returning `true` stops
/// the search with [`SearchError::Cancelled`]. This is the injection point
/// for caller-side timeouts and move budgets.
#[derive(Clone, Copy, Default)]
pub struct SearchOptions<'a> {
    pub limits: SearchLimits,
    pub cancel: Option<&'a dyn Fn() -> bool>,
}

impl<'a> SearchOptions<'a> {
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: &'a dyn Fn() -> bool) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl fmt::Debug for SearchOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("limits", &self.limits)
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A concrete start-to-goal path with its total edge cost.
pub struct FoundPath<N> {
    /// Node sequence, start and goal inclusive.
    pub nodes: Vec<N>,
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Outcome of a path search. `Unreachable` is an ordinary result, distinct
/// from any error.
pub enum PathOutcome<N> {
    Found(FoundPath<N>),
    Unreachable,
}

impl<N> PathOutcome<N> {
    pub fn found(self) -> Option<FoundPath<N>> {
        match self {
            PathOutcome::Found(p) => Some(p),
            PathOutcome::Unreachable => None,
        }
    }
}
