use rustc_hash::FxHashMap;
use searchkit::graph::Graph;
use searchkit::search::uninformed::{
    bfs, bfs_tree, bidirectional, depth_limited_dfs, dfs, iterative_deepening,
};
use searchkit::search::{PathOutcome, SearchError, SearchLimits, SearchOptions};

/// The undirected graph 3-6, 6-0, 6-4, 3-9, 9-5, 9-7.
fn sample() -> Graph<i32> {
    let mut g = Graph::new();
    g.add_edge(3, 6);
    g.add_edge(6, 0);
    g.add_edge(6, 4);
    g.add_edge(3, 9);
    g.add_edge(9, 5);
    g.add_edge(9, 7);
    g
}

/// Hop distances from `start`, rebuilt from the BFS predecessor tree.
fn hop_distances(g: &Graph<i32>, start: i32) -> FxHashMap<i32, usize> {
    let parents = bfs_tree(g, &start, &SearchOptions::default()).unwrap();
    let mut dist = FxHashMap::default();
    dist.insert(start, 0usize);
    // Small graphs: resolve lazily by walking parent links.
    for node in parents.keys() {
        let mut hops = 0;
        let mut cursor = *node;
        while let Some(p) = parents.get(&cursor) {
            hops += 1;
            cursor = *p;
        }
        dist.insert(*node, hops);
    }
    dist
}

#[test]
fn bfs_visits_in_ascending_neighbor_order() {
    let g = sample();
    let order = bfs(&g, &3, &SearchOptions::default()).unwrap();
    assert_eq!(order, vec![3, 6, 9, 0, 4, 5, 7]);
}

#[test]
fn bfs_hop_distance_is_non_decreasing() {
    let g = sample();
    let order = bfs(&g, &3, &SearchOptions::default()).unwrap();
    let dist = hop_distances(&g, 3);

    let seen: Vec<usize> = order.iter().map(|n| dist[n]).collect();
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "distances: {seen:?}");
}

#[test]
fn bfs_tree_links_are_graph_edges() {
    let g = sample();
    let parents = bfs_tree(&g, &3, &SearchOptions::default()).unwrap();

    assert_eq!(parents.len(), 6);
    for (child, parent) in &parents {
        assert!(g.edge_cost(parent, child).is_some());
    }
}

#[test]
fn dfs_returns_post_order_with_start_last() {
    let g = sample();
    let order = dfs(&g, &3, &SearchOptions::default()).unwrap();

    assert_eq!(order, vec![0, 4, 6, 5, 7, 9, 3]);
    assert_eq!(order.last(), Some(&3));
}

#[test]
fn depth_limited_dfs_respects_the_limit() {
    let g = sample();
    let opts = SearchOptions::default();

    // Limit 0 only matches the start itself.
    assert!(depth_limited_dfs(&g, &3, &3, 0, &opts).unwrap());
    assert!(!depth_limited_dfs(&g, &3, &4, 0, &opts).unwrap());

    assert!(depth_limited_dfs(&g, &3, &6, 1, &opts).unwrap());
    assert!(!depth_limited_dfs(&g, &3, &7, 1, &opts).unwrap());
    assert!(depth_limited_dfs(&g, &3, &4, 2, &opts).unwrap());
}

#[test]
fn iterative_deepening_reports_the_first_successful_depth() {
    let g = sample();
    let opts = SearchOptions::default();

    assert_eq!(iterative_deepening(&g, &3, &7, 2, &opts).unwrap(), Some(2));
    assert_eq!(iterative_deepening(&g, &3, &3, 2, &opts).unwrap(), Some(0));
    assert_eq!(iterative_deepening(&g, &3, &42, 3, &opts).unwrap(), None);
}

#[test]
fn bidirectional_matches_bfs_distance_on_unit_graphs() {
    let g = sample();
    let dist = hop_distances(&g, 3);

    for target in [0, 4, 5, 6, 7, 9] {
        let path = bidirectional(&g, &3, &target, &SearchOptions::default())
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(path.nodes.len() - 1, dist[&target], "target {target}");
        assert_eq!(path.nodes.first(), Some(&3));
        assert_eq!(path.nodes.last(), Some(&target));
        // Consecutive pairs must all be stored edges.
        assert_eq!(g.path_cost(&path.nodes), Some(path.cost));
    }
}

#[test]
fn bidirectional_prefers_the_shorter_of_two_routes() {
    // Two routes from 0 to 100: a long chain through 1-10-20-30 (5 hops)
    // and a short one through 50-51-52 (4 hops). The long side fans out
    // wider at the start, so a search that stops on its first meeting node
    // would return the 5-hop route.
    let mut g = Graph::new();
    for (a, b) in [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 50),
        (1, 10),
        (10, 20),
        (20, 30),
        (30, 100),
        (50, 51),
        (51, 52),
        (52, 100),
    ] {
        g.add_edge(a, b);
    }

    let path = bidirectional(&g, &0, &100, &SearchOptions::default())
        .unwrap()
        .found()
        .unwrap();
    let dist = hop_distances(&g, 0);

    assert_eq!(path.nodes, vec![0, 50, 51, 52, 100]);
    assert_eq!(path.nodes.len() - 1, dist[&100]);
    assert_eq!(g.path_cost(&path.nodes), Some(path.cost));
}

#[test]
fn bidirectional_start_equals_goal() {
    let g = sample();
    let out = bidirectional(&g, &3, &3, &SearchOptions::default()).unwrap();
    assert_eq!(
        out.found().map(|p| (p.nodes, p.cost)),
        Some((vec![3], 0))
    );
}

#[test]
fn bidirectional_reports_unreachable_across_components() {
    let mut g = sample();
    g.add_edge(100, 101);

    let out = bidirectional(&g, &3, &100, &SearchOptions::default()).unwrap();
    assert_eq!(out, PathOutcome::Unreachable);
}

#[test]
fn cancellation_stops_the_search() {
    let g = sample();
    let cancel = || true;
    let opts = SearchOptions::default().with_cancel(&cancel);

    let err = bfs(&g, &3, &opts).unwrap_err();
    assert!(matches!(err, SearchError::Cancelled { .. }));
}

#[test]
fn expansion_budget_stops_the_search() {
    let g = sample();
    let opts = SearchOptions::new(SearchLimits {
        max_expansions: 2,
        ..SearchLimits::default()
    });

    let err = bfs(&g, &3, &opts).unwrap_err();
    assert!(matches!(
        err,
        SearchError::LimitExceeded {
            metric: "expansions",
            ..
        }
    ));
}
