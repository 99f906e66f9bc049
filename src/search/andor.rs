//! AO* search over the graph's AND-OR relation.
//!
//! A node is *solved* when it is the goal, when any one OR child is solved,
//! or when **every** member of its AND group is solved. Costs charge one
//! unit per relation edge:
//! - OR option: `1 + cost(child)`, options compete individually
//! - AND option: `sum over the group of (1 + cost(member))`; the plan must
//!   pay for every mandatory branch, so the aggregate is the sum
//!
//! Resolution propagates upward from the goal (cost 0) through the reversed
//! relation, always committing the cheapest unresolved candidate first
//! (costs are non-negative, so a committed cost is final). The search stops
//! as soon as `start` resolves, or reports `Unreachable` when the candidate
//! queue empties. Cycles in the relation are legal; an unresolvable cycle
//! simply never produces a candidate, so the loop terminates instead of
//! propagating forever.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{Graph, NodeKey};
use crate::search::resources::ResourceTracker;
use crate::search::{SearchError, SearchOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a solved node is resolved in the extracted plan.
pub enum PlanStep<N> {
    /// The node is the goal itself.
    Goal,
    /// Resolved through a single OR child.
    Or(N),
    /// Resolved through its AND group (members in ascending node order).
    And(Vec<N>),
}

#[derive(Debug, Clone)]
/// A solved AND-OR plan: the start's cost and the chosen step for every
/// node the plan actually uses.
pub struct AndOrPlan<N> {
    pub cost: u64,
    pub choices: FxHashMap<N, PlanStep<N>>,
}

// Comparing `choices` needs the map's key bounds, which a derive would not
// require of `N`.
impl<N: NodeKey> PartialEq for AndOrPlan<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.choices == other.choices
    }
}

impl<N: NodeKey> Eq for AndOrPlan<N> {}

#[derive(Debug, Clone)]
pub enum AndOrOutcome<N> {
    Solved(AndOrPlan<N>),
    Unreachable,
}

impl<N: NodeKey> PartialEq for AndOrOutcome<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AndOrOutcome::Solved(a), AndOrOutcome::Solved(b)) => a == b,
            (AndOrOutcome::Unreachable, AndOrOutcome::Unreachable) => true,
            _ => false,
        }
    }
}

impl<N: NodeKey> Eq for AndOrOutcome<N> {}

impl<N> AndOrOutcome<N> {
    pub fn solved(self) -> Option<AndOrPlan<N>> {
        match self {
            AndOrOutcome::Solved(p) => Some(p),
            AndOrOutcome::Unreachable => None,
        }
    }
}

/// Reverse index of the AND-OR relation, validated once per search.
struct Relation<N> {
    /// child -> parents that list it as an OR alternative
    or_parents: FxHashMap<N, Vec<N>>,
    /// child -> parents whose AND group contains it
    and_parents: FxHashMap<N, Vec<N>>,
    /// parent -> distinct AND group members, ascending
    and_group: FxHashMap<N, Vec<N>>,
}

impl<N: NodeKey> Relation<N> {
    fn build(graph: &Graph<N>) -> Result<Self, SearchError> {
        let mut or_parents: FxHashMap<N, Vec<N>> = FxHashMap::default();
        let mut and_parents: FxHashMap<N, Vec<N>> = FxHashMap::default();
        let mut and_group: FxHashMap<N, Vec<N>> = FxHashMap::default();

        for (parent, children) in graph.and_or_relation() {
            let mut and_members: Vec<N> = Vec::new();
            let mut or_members: Vec<N> = Vec::new();

            for entry in children {
                if entry.child == *parent {
                    return Err(SearchError::InvalidConfiguration {
                        reason: format!("AND-OR entry lists {parent:?} as its own child"),
                    });
                }
                if entry.is_and {
                    and_members.push(entry.child.clone());
                } else {
                    or_members.push(entry.child.clone());
                }
            }

            and_members.sort_unstable();
            and_members.dedup();
            or_members.sort_unstable();
            or_members.dedup();

            for c in &and_members {
                if or_members.contains(c) {
                    return Err(SearchError::InvalidConfiguration {
                        reason: format!(
                            "node {c:?} is listed under {parent:?} as both an AND and an OR child"
                        ),
                    });
                }
                and_parents.entry(c.clone()).or_default().push(parent.clone());
            }
            for c in &or_members {
                or_parents.entry(c.clone()).or_default().push(parent.clone());
            }
            if !and_members.is_empty() {
                and_group.insert(parent.clone(), and_members);
            }
        }

        Ok(Self {
            or_parents,
            and_parents,
            and_group,
        })
    }
}

/// AO* entry point: solve `start` against `goal` over the AND-OR relation.
pub fn ao_star<N: NodeKey>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    opts: &SearchOptions<'_>,
) -> Result<AndOrOutcome<N>, SearchError> {
    graph.ensure_known("ao_star", start)?;
    graph.ensure_known("ao_star", goal)?;
    let relation = Relation::build(graph)?;
    let mut tracker = ResourceTracker::new(opts);

    let mut solved: FxHashMap<N, u64> = FxHashMap::default();
    let mut choice: FxHashMap<N, PlanStep<N>> = FxHashMap::default();
    // Best pending candidate per node, with the step that produced it.
    let mut pending: FxHashMap<N, (u64, PlanStep<N>)> = FxHashMap::default();
    let mut heap: BinaryHeap<Reverse<(u64, N)>> = BinaryHeap::new();
    // Per-parent countdown of still-unsolved AND members, and the running
    // sum of committed member options.
    let mut and_remaining: FxHashMap<N, usize> = FxHashMap::default();
    let mut and_sum: FxHashMap<N, u64> = FxHashMap::default();
    for (parent, members) in &relation.and_group {
        and_remaining.insert(parent.clone(), members.len());
        and_sum.insert(parent.clone(), 0);
    }

    pending.insert(goal.clone(), (0, PlanStep::Goal));
    heap.push(Reverse((0, goal.clone())));
    tracker.bump_frontier("ao_star", 1)?;

    while let Some(Reverse((cost, node))) = heap.pop() {
        if solved.contains_key(&node) {
            continue;
        }
        match pending.get(&node) {
            Some((best, _)) if *best < cost => continue,
            _ => {}
        }
        tracker.bump_expansions("ao_star", 1)?;

        let (_, step) = pending
            .remove(&node)
            .unwrap_or((cost, PlanStep::Goal));
        solved.insert(node.clone(), cost);
        choice.insert(node.clone(), step);

        if node == *start {
            let choices = extract_plan(start, &choice, &mut tracker)?;
            return Ok(AndOrOutcome::Solved(AndOrPlan { cost, choices }));
        }

        let option = cost.saturating_add(1);

        if let Some(parents) = relation.or_parents.get(&node) {
            for p in parents {
                if solved.contains_key(p) {
                    continue;
                }
                offer(
                    &mut pending,
                    &mut heap,
                    &mut tracker,
                    p,
                    option,
                    PlanStep::Or(node.clone()),
                )?;
            }
        }

        if let Some(parents) = relation.and_parents.get(&node) {
            for p in parents {
                if solved.contains_key(p) {
                    continue;
                }
                let remaining = and_remaining
                    .get_mut(p)
                    .map(|r| {
                        *r -= 1;
                        *r
                    })
                    .unwrap_or(0);
                let sum = and_sum
                    .entry(p.clone())
                    .and_modify(|s| *s = s.saturating_add(option))
                    .or_insert(option);
                if remaining == 0 {
                    let group = relation
                        .and_group
                        .get(p)
                        .cloned()
                        .unwrap_or_default();
                    let total = *sum;
                    offer(
                        &mut pending,
                        &mut heap,
                        &mut tracker,
                        p,
                        total,
                        PlanStep::And(group),
                    )?;
                }
            }
        }
    }

    Ok(AndOrOutcome::Unreachable)
}

/// Record a candidate cost for `node` if it improves on the pending one.
fn offer<N: NodeKey>(
    pending: &mut FxHashMap<N, (u64, PlanStep<N>)>,
    heap: &mut BinaryHeap<Reverse<(u64, N)>>,
    tracker: &mut ResourceTracker<'_>,
    node: &N,
    cost: u64,
    step: PlanStep<N>,
) -> Result<(), SearchError> {
    let better = match pending.get(node) {
        Some((best, _)) => cost < *best,
        None => true,
    };
    if better {
        pending.insert(node.clone(), (cost, step));
        heap.push(Reverse((cost, node.clone())));
        tracker.bump_frontier("ao_star", 1)?;
    }
    Ok(())
}

/// Collect the plan steps reachable from `start`, guarding against a chosen
/// step depending on one of its own ancestors.
fn extract_plan<N: NodeKey>(
    start: &N,
    choice: &FxHashMap<N, PlanStep<N>>,
    tracker: &mut ResourceTracker<'_>,
) -> Result<FxHashMap<N, PlanStep<N>>, SearchError> {
    enum Visit<N> {
        Enter(N),
        Exit(N),
    }

    let mut plan: FxHashMap<N, PlanStep<N>> = FxHashMap::default();
    let mut in_progress: FxHashSet<N> = FxHashSet::default();
    let mut stack: Vec<Visit<N>> = vec![Visit::Enter(start.clone())];

    while let Some(visit) = stack.pop() {
        tracker.bump_steps("ao_star_plan", 1)?;
        match visit {
            Visit::Enter(node) => {
                if plan.contains_key(&node) {
                    continue;
                }
                if !in_progress.insert(node.clone()) {
                    return Err(SearchError::CycleDetected {
                        node: format!("{node:?}"),
                    });
                }
                stack.push(Visit::Exit(node.clone()));
                match choice.get(&node) {
                    Some(PlanStep::Or(c)) => stack.push(Visit::Enter(c.clone())),
                    Some(PlanStep::And(members)) => {
                        for m in members {
                            stack.push(Visit::Enter(m.clone()));
                        }
                    }
                    Some(PlanStep::Goal) | None => {}
                }
            }
            Visit::Exit(node) => {
                in_progress.remove(&node);
                if let Some(step) = choice.get(&node) {
                    plan.insert(node, step.clone());
                }
            }
        }
    }

    Ok(plan)
}
