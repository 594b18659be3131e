use resilink::graph::generators::{generate_grid, Link, LinkCostWeigher};
use resilink::search::{shortest_paths, shortest_paths_by_hops};
use resilink::{DijkstraSearch, DirectedGraph, Edge, EdgeWeigher, Error, Graph, ScalarWeight};
use std::collections::HashSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Test helper function to build a graph from (src, dst, cost) triples
fn build_graph(links: &[(u32, u32, f64)]) -> DirectedGraph<u32, Link> {
    DirectedGraph::new(
        std::iter::empty(),
        links.iter().map(|&(s, d, c)| Link::new(s, d, c)),
    )
}

// The four-node diamond: two equal-cost routes from 0 to 3
fn diamond() -> DirectedGraph<u32, Link> {
    build_graph(&[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0)])
}

#[test]
fn test_graph_adds_missing_endpoints() {
    let graph = build_graph(&[(0, 1, 1.0), (1, 2, 1.0)]);

    assert_eq!(graph.vertex_count(), 3, "endpoints should be auto-added");
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.contains_vertex(&0));
    assert!(graph.contains_vertex(&2));
}

#[test]
fn test_graph_structural_equality() {
    let a = diamond();
    let b = diamond();
    let c = build_graph(&[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0)]);

    assert_eq!(a, b, "graphs with the same vertices and edges are equal");
    assert_ne!(a, c);
}

#[test]
fn test_mutable_working_copy() {
    use resilink::{MutableDirectedGraph, MutableGraph};

    let snapshot = diamond();
    let mut copy: MutableDirectedGraph<u32, Link> = MutableDirectedGraph::from_graph(&snapshot);
    assert_eq!(copy.vertex_count(), snapshot.vertex_count());
    assert_eq!(copy.edge_count(), snapshot.edge_count());

    assert!(copy.add_vertex(7));
    assert!(!copy.add_vertex(7), "duplicate vertices are rejected");
    assert!(copy.add_edge(Link::new(3, 7, 1.0)));

    assert!(copy.remove_vertex(&1));
    assert_eq!(
        copy.edge_count(),
        3,
        "removing a vertex drops its incident edges"
    );
    assert!(!copy.contains_edge(&Link::new(0, 1, 1.0)));

    // The caller's snapshot is untouched
    assert_eq!(snapshot.vertex_count(), 4);
    assert_eq!(snapshot.edge_count(), 4);
}

/// Weigher over exact ordered-float weights, no tie tolerance
#[derive(Debug)]
struct ExactWeigher;

impl EdgeWeigher<u32, Link> for ExactWeigher {
    type W = ordered_float::OrderedFloat<f64>;

    fn weight(&self, edge: &Link) -> Self::W {
        edge.cost
    }

    fn initial_weight(&self) -> Self::W {
        ordered_float::OrderedFloat(0.0)
    }

    fn non_viable_weight(&self) -> Self::W {
        ordered_float::OrderedFloat(f64::INFINITY)
    }
}

#[test]
fn test_exact_float_weights() {
    // Exact comparison: a 1e-12 difference is no longer a tie
    let graph = build_graph(&[
        (0, 1, 1.0),
        (1, 3, 1.0),
        (0, 2, 1.0),
        (2, 3, 1.0 + 1e-12),
    ]);

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&3), &ExactWeigher, None)
        .unwrap();

    assert_eq!(result.paths().len(), 1);
    assert_eq!(result.cost(&3).unwrap().0, 2.0);
}

#[test]
fn test_shortest_path_simple_chain() {
    init_logging();
    let graph = build_graph(&[(0, 1, 2.0), (1, 2, 3.0), (2, 3, 1.0)]);

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&3), &LinkCostWeigher, None)
        .unwrap();

    assert_eq!(result.cost(&3).unwrap().value(), 6.0);
    let paths: Vec<_> = result.paths_to(&3).collect();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].len(), 3);
    assert_eq!(paths[0].src(), &0);
    assert_eq!(paths[0].dst(), &3);
}

#[test]
fn test_diamond_returns_both_equal_cost_paths() {
    let graph = diamond();

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&3), &LinkCostWeigher, Some(2))
        .unwrap();

    assert_eq!(result.cost(&3).unwrap().value(), 2.0);
    let paths: HashSet<Vec<u32>> = result
        .paths()
        .iter()
        .map(|p| p.vertices().copied().collect())
        .collect();
    let expected: HashSet<Vec<u32>> = [vec![0, 1, 3], vec![0, 2, 3]].into_iter().collect();
    assert_eq!(paths, expected, "both length-2 routes should be returned");
}

#[test]
fn test_max_paths_bounds_reconstruction() {
    let graph = diamond();

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&3), &LinkCostWeigher, Some(1))
        .unwrap();

    assert_eq!(result.paths().len(), 1);
    assert_eq!(
        result.parent_edges(&3).len(),
        1,
        "a single parent edge should be retained per vertex"
    );
}

#[test]
fn test_epsilon_tie_accrues_both_parents() {
    // The second route is 1e-12 more expensive, well inside the tolerance
    let graph = build_graph(&[
        (0, 1, 1.0),
        (1, 3, 1.0),
        (0, 2, 1.0),
        (2, 3, 1.0 + 1e-12),
    ]);

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&3), &LinkCostWeigher, None)
        .unwrap();

    assert_eq!(result.paths().len(), 2, "near-equal costs count as tied");
}

#[test]
fn test_unreachable_destination_is_not_an_error() {
    let graph = DirectedGraph::new(vec![0u32, 1, 2], vec![Link::new(0, 1, 1.0)]);

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&2), &LinkCostWeigher, None)
        .unwrap();

    assert!(result.cost(&2).is_none());
    assert!(result.paths().is_empty());
}

#[test]
fn test_zero_edge_graph_has_only_trivial_path() {
    let graph: DirectedGraph<u32, Link> = DirectedGraph::new(vec![0, 1], std::iter::empty());

    let result = DijkstraSearch::new()
        .search(&graph, &0, None, &LinkCostWeigher, None)
        .unwrap();

    assert_eq!(result.paths().len(), 1);
    assert!(result.paths()[0].is_empty());
    assert_eq!(result.paths()[0].cost().value(), 0.0);
    assert!(result.cost(&1).is_none());
}

#[test]
fn test_missing_endpoints_fail_fast() {
    let graph = diamond();
    let search = DijkstraSearch::new();

    assert_eq!(
        search
            .search(&graph, &9, Some(&3), &LinkCostWeigher, None)
            .unwrap_err(),
        Error::SourceNotFound
    );
    assert_eq!(
        search
            .search(&graph, &0, Some(&9), &LinkCostWeigher, None)
            .unwrap_err(),
        Error::DestinationNotFound
    );
}

#[test]
fn test_search_to_all_destinations() {
    let graph = build_graph(&[(0, 1, 1.0), (1, 2, 1.0)]);

    let result = DijkstraSearch::new()
        .search(&graph, &0, None, &LinkCostWeigher, Some(1))
        .unwrap();

    assert_eq!(result.cost(&0).unwrap().value(), 0.0);
    assert_eq!(result.cost(&1).unwrap().value(), 1.0);
    assert_eq!(result.cost(&2).unwrap().value(), 2.0);
    assert_eq!(result.paths().len(), 3, "one path per reached vertex");
}

#[test]
fn test_edge_filter_restricts_relaxation() {
    let graph = diamond();

    let result = DijkstraSearch::new()
        .search_filtered(&graph, &0, Some(&3), &LinkCostWeigher, None, |e| {
            !(e.src == 0 && e.dst == 1)
        })
        .unwrap();

    let paths: Vec<Vec<u32>> = result
        .paths()
        .iter()
        .map(|p| p.vertices().copied().collect())
        .collect();
    assert_eq!(paths, vec![vec![0, 2, 3]]);
}

#[test]
fn test_negative_edges_rejected_by_default() {
    let graph = build_graph(&[(0, 1, -1.0), (0, 2, 5.0), (2, 1, 5.0)]);

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&1), &LinkCostWeigher, None)
        .unwrap();

    assert_eq!(
        result.cost(&1).unwrap().value(),
        10.0,
        "the negative edge must be skipped, not traversed"
    );
}

/// Weigher that marks one link as non-viable
#[derive(Debug)]
struct BlockingWeigher {
    blocked: (u32, u32),
}

impl EdgeWeigher<u32, Link> for BlockingWeigher {
    type W = ScalarWeight;

    fn weight(&self, edge: &Link) -> ScalarWeight {
        if (edge.src, edge.dst) == self.blocked {
            ScalarWeight::non_viable()
        } else {
            ScalarWeight::new(edge.cost.0)
        }
    }

    fn initial_weight(&self) -> ScalarWeight {
        ScalarWeight::zero()
    }

    fn non_viable_weight(&self) -> ScalarWeight {
        ScalarWeight::non_viable()
    }
}

#[test]
fn test_non_viable_edges_are_silently_skipped() {
    let graph = diamond();
    let weigher = BlockingWeigher { blocked: (1, 3) };

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&3), &weigher, None)
        .unwrap();

    let paths: Vec<Vec<u32>> = result
        .paths()
        .iter()
        .map(|p| p.vertices().copied().collect())
        .collect();
    assert_eq!(paths, vec![vec![0, 2, 3]]);
}

#[test]
fn test_grid_corner_to_corner() {
    let graph = generate_grid(3, 3);

    let result = DijkstraSearch::new()
        .search(&graph, &0, Some(&8), &LinkCostWeigher, None)
        .unwrap();

    assert_eq!(result.cost(&8).unwrap().value(), 4.0);
    // Every 4-hop route on a 3x3 grid is monotone; there are C(4,2) of them
    assert_eq!(result.paths().len(), 6);
    for path in result.paths() {
        assert_eq!(path.cost().value(), 4.0);
        let vertices: Vec<u32> = path.vertices().copied().collect();
        let unique: HashSet<u32> = vertices.iter().copied().collect();
        assert_eq!(vertices.len(), unique.len(), "paths must be simple");
        for pair in path.edges().windows(2) {
            assert_eq!(pair[0].dst(), pair[1].src(), "edges must be contiguous");
        }
    }
}

#[test]
fn test_convenience_entry_points() {
    let graph = build_graph(&[(0, 1, 4.0), (1, 2, 4.0), (0, 2, 9.0)]);

    let by_cost = shortest_paths(&graph, &0, Some(&2), &LinkCostWeigher, Some(1)).unwrap();
    assert_eq!(by_cost.cost(&2).unwrap().value(), 8.0);

    // Under hop count the direct link wins
    let by_hops = shortest_paths_by_hops(&graph, &0, Some(&2), Some(1)).unwrap();
    assert_eq!(by_hops.cost(&2).unwrap().value(), 1.0);
    assert_eq!(by_hops.paths()[0].len(), 1);
}

#[test]
fn test_repeated_searches_are_idempotent() {
    let graph = generate_grid(4, 4);
    let search = DijkstraSearch::new();

    let first = search
        .search(&graph, &0, Some(&15), &LinkCostWeigher, None)
        .unwrap();
    let second = search
        .search(&graph, &0, Some(&15), &LinkCostWeigher, None)
        .unwrap();

    assert_eq!(first.cost(&15), second.cost(&15));
    let a: HashSet<_> = first.paths().iter().cloned().collect();
    let b: HashSet<_> = second.paths().iter().cloned().collect();
    assert_eq!(a, b);
}
