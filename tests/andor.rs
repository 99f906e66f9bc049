use searchkit::graph::Graph;
use searchkit::search::andor::{ao_star, AndOrOutcome, PlanStep};
use searchkit::search::{SearchError, SearchOptions};

/// The AND-OR relation from the weighted sample: A-and->B, A-or->C,
/// B-or->D, C-and->D, B-and->E, D-or->E.
fn sample() -> Graph<char> {
    let mut g = Graph::new();
    g.add_and_or_edge('A', 'B', true);
    g.add_and_or_edge('A', 'C', false);
    g.add_and_or_edge('B', 'D', false);
    g.add_and_or_edge('C', 'D', true);
    g.add_and_or_edge('B', 'E', true);
    g.add_and_or_edge('D', 'E', false);
    g
}

#[test]
fn ao_star_solves_through_the_cheapest_resolution() {
    let g = sample();
    let plan = ao_star(&g, &'A', &'E', &SearchOptions::default())
        .unwrap()
        .solved()
        .unwrap();

    // A resolves through its AND group {B}; B through its AND group {E}.
    assert_eq!(plan.cost, 2);
    assert_eq!(plan.choices.len(), 3);
    assert_eq!(plan.choices[&'A'], PlanStep::And(vec!['B']));
    assert_eq!(plan.choices[&'B'], PlanStep::And(vec!['E']));
    assert_eq!(plan.choices[&'E'], PlanStep::Goal);
}

#[test]
fn an_and_group_needs_every_member_solved() {
    let mut g = Graph::new();
    g.add_and_or_edge('R', 'S', true);
    g.add_and_or_edge('R', 'T', true);
    g.add_and_or_edge('S', 'G', false);
    // T has no resolution, so R must not resolve through {S, T}.

    let out = ao_star(&g, &'R', &'G', &SearchOptions::default()).unwrap();
    assert_eq!(out, AndOrOutcome::Unreachable);
}

#[test]
fn and_cost_is_the_sum_over_the_group() {
    let mut g = Graph::new();
    g.add_and_or_edge('R', 'S', true);
    g.add_and_or_edge('R', 'T', true);
    g.add_and_or_edge('S', 'G', false);
    g.add_and_or_edge('T', 'G', false);

    let plan = ao_star(&g, &'R', &'G', &SearchOptions::default())
        .unwrap()
        .solved()
        .unwrap();

    // S and T each cost 1; R pays (1 + 1) + (1 + 1).
    assert_eq!(plan.cost, 4);
    assert_eq!(plan.choices[&'R'], PlanStep::And(vec!['S', 'T']));
    assert_eq!(plan.choices[&'S'], PlanStep::Or('G'));
    assert_eq!(plan.choices[&'T'], PlanStep::Or('G'));
}

#[test]
fn or_alternatives_compete_individually() {
    let mut g = Graph::new();
    // Two OR routes of different depth: R->G directly, R->S->G.
    g.add_and_or_edge('R', 'S', false);
    g.add_and_or_edge('R', 'G', false);
    g.add_and_or_edge('S', 'G', false);

    let plan = ao_star(&g, &'R', &'G', &SearchOptions::default())
        .unwrap()
        .solved()
        .unwrap();

    assert_eq!(plan.cost, 1);
    assert_eq!(plan.choices[&'R'], PlanStep::Or('G'));
}

#[test]
fn start_equal_to_goal_is_trivially_solved() {
    let g: Graph<char> = Graph::new();
    let plan = ao_star(&g, &'X', &'X', &SearchOptions::default())
        .unwrap()
        .solved()
        .unwrap();
    assert_eq!(plan.cost, 0);
    assert_eq!(plan.choices[&'X'], PlanStep::Goal);
}

#[test]
fn unreachable_start_is_a_value_not_an_error() {
    let g = sample();
    let out = ao_star(&g, &'Z', &'E', &SearchOptions::default()).unwrap();
    assert_eq!(out, AndOrOutcome::Unreachable);
}

#[test]
fn a_cyclic_relation_terminates() {
    let mut g = Graph::new();
    g.add_and_or_edge('A', 'B', false);
    g.add_and_or_edge('B', 'A', false);

    let out = ao_star(&g, &'A', &'G', &SearchOptions::default()).unwrap();
    assert_eq!(out, AndOrOutcome::Unreachable);
}

#[test]
fn a_node_cannot_be_its_own_child() {
    let mut g = Graph::new();
    g.add_and_or_edge('P', 'P', true);

    let err = ao_star(&g, &'P', &'G', &SearchOptions::default()).unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfiguration { .. }));
}

#[test]
fn a_child_cannot_be_both_and_and_or_under_one_parent() {
    let mut g = Graph::new();
    g.add_and_or_edge('P', 'Q', true);
    g.add_and_or_edge('P', 'Q', false);

    let err = ao_star(&g, &'P', &'G', &SearchOptions::default()).unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfiguration { .. }));
}
