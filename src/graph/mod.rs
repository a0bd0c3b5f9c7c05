use crate::collections::FxIndexMap;
use crate::errors::{PathfinderError, Result};
use crate::geometry::squared_euclidean;
use crate::graph_algos::dijkstra::{Search, dijkstra};
use crate::route::Route;

use geo_types::Coord;
use ordered_float::OrderedFloat;

pub mod builder;


/// Graph node key - coordinates are hashed by exact value
pub(crate) type Node = Coord<OrderedFloat<f64>>;

fn node_key(coord: Coord<f64>) -> Node {
    Coord { x: OrderedFloat(coord.x), y: OrderedFloat(coord.y) }
}

fn node_coord(node: &Node) -> Coord<f64> {
    Coord { x: node.x.into_inner(), y: node.y.into_inner() }
}


/// Undirected weighted graph keyed by coordinate
/// Each edge is stored in both directions, weights are distances in meters
/// Nodes and neighbors iterate in insertion order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoadGraph {
    adjacency: FxIndexMap<Node, FxIndexMap<Node, f64>>,
}

impl RoadGraph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an undirected edge, overwriting the weight of an existing a-b edge
    /// weight must be non-negative
    pub fn add_edge(&mut self, a: Coord<f64>, b: Coord<f64>, weight: f64) {
        let (a, b) = (node_key(a), node_key(b));
        self.adjacency.entry(a).or_default().insert(b, weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains_node(&self, coord: Coord<f64>) -> bool {
        self.adjacency.contains_key(&node_key(coord))
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.adjacency.keys().map(node_coord)
    }

    /// Neighbors of a node with the connecting edge weight, empty for unknown nodes
    pub fn neighbors(&self, coord: Coord<f64>) -> impl Iterator<Item = (Coord<f64>, f64)> + '_ {
        self.adjacency
            .get(&node_key(coord))
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(node, &weight)| (node_coord(node), weight)))
    }

    pub fn weight(&self, a: Coord<f64>, b: Coord<f64>) -> Option<f64> {
        self.adjacency.get(&node_key(a))?.get(&node_key(b)).copied()
    }

    /// Every undirected edge exactly once as (a, b, weight)
    pub fn edges(&self) -> impl Iterator<Item = (Coord<f64>, Coord<f64>, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(index, (a, edges))| {
            edges.iter().filter_map(move |(b, &weight)| {
                // report each pair from the endpoint inserted first
                let b_index = self.adjacency.get_index_of(b)?;
                (b_index >= index).then(|| (node_coord(a), node_coord(b), weight))
            })
        })
    }

    /// Node closest to target by planar squared distance in the graph's own axes
    /// This is not geodesic, which is fine for small local networks
    /// Ties keep the first node in insertion order
    pub fn nearest_node(&self, target: Coord<f64>) -> Result<Coord<f64>> {
        let mut best: Option<(&Node, f64)> = None;

        for node in self.adjacency.keys() {
            let d = squared_euclidean(node.x.into_inner(), node.y.into_inner(), target.x, target.y);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((node, d));
            }
        }

        best.map(|(node, _)| node_coord(node)).ok_or(PathfinderError::EmptyGraph)
    }

    /// Minimum weight path between two graph nodes
    /// An unreachable end is not an error: the route has infinite distance and no nodes
    pub fn shortest_path(&self, start: Coord<f64>, end: Coord<f64>) -> Result<Route> {
        let start = self.existing_node(start)?;
        let end = self.existing_node(end)?;

        let search = dijkstra(
            start,
            |node: &Node| {
                self.adjacency
                    .get(node)
                    .into_iter()
                    .flat_map(|edges| edges.iter().map(|(neighbor, &weight)| (*neighbor, OrderedFloat(weight))))
            },
            |node| *node == end,
        )?;

        Ok(match search {
            Search::Found { cost, path } => Route::new(cost.into_inner(), path.iter().map(node_coord).collect()),
            Search::Unreachable => Route::unreachable(),
        })
    }

    fn existing_node(&self, coord: Coord<f64>) -> Result<Node> {
        let node = node_key(coord);
        if self.adjacency.contains_key(&node) {
            Ok(node)
        } else {
            Err(PathfinderError::NodeNotFound { x: coord.x, y: coord.y })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo_types::coord;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const A: Coord<f64> = Coord { x: 41.70, y: -86.24 };
    const B: Coord<f64> = Coord { x: 41.70, y: -86.23 };
    const C: Coord<f64> = Coord { x: 41.69, y: -86.24 };
    const D: Coord<f64> = Coord { x: 41.69, y: -86.23 };
    const E: Coord<f64> = Coord { x: 41.60, y: -86.10 };

    fn square_graph() -> RoadGraph {
        let mut graph = RoadGraph::new();
        graph.add_edge(A, B, 100.0);
        graph.add_edge(B, D, 100.0);
        graph.add_edge(A, C, 100.0);
        graph.add_edge(C, D, 100.0);
        graph.add_edge(A, D, 200.0); // diagonal
        graph
    }

    /// Random connected-ish grid with jittered weights
    fn random_graph(seed: u64) -> RoadGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = RoadGraph::new();

        for i in 0..8 {
            for j in 0..8 {
                let here = coord! { x: i as f64, y: j as f64 };
                if rng.random_bool(0.8) {
                    graph.add_edge(here, coord! { x: i as f64 + 1.0, y: j as f64 }, rng.random_range(1.0..50.0));
                }
                if rng.random_bool(0.8) {
                    graph.add_edge(here, coord! { x: i as f64, y: j as f64 + 1.0 }, rng.random_range(1.0..50.0));
                }
            }
        }
        graph
    }

    #[test]
    fn test_edges_are_undirected() {
        let graph = square_graph();

        assert_eq!(graph.weight(A, B), Some(100.0));
        assert_eq!(graph.weight(B, A), Some(100.0));
        assert_eq!(graph.weight(D, A), Some(200.0));
        assert_eq!(graph.weight(B, C), None);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_reinserting_edge_overwrites_weight() {
        let mut graph = square_graph();
        graph.add_edge(B, A, 250.0);

        // last write wins, even when it is worse
        assert_eq!(graph.weight(A, B), Some(250.0));
        assert_eq!(graph.weight(B, A), Some(250.0));
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_edges_enumerated_once() {
        let graph = square_graph();
        let mut edges: Vec<_> = graph.edges().map(|(_, _, w)| w).collect();
        edges.sort_by(f64::total_cmp);

        assert_eq!(edges, vec![100.0, 100.0, 100.0, 100.0, 200.0]);
    }

    #[test]
    fn test_neighbors() {
        let graph = square_graph();
        let neighbors: Vec<_> = graph.neighbors(A).collect();

        assert_eq!(neighbors, vec![(B, 100.0), (C, 100.0), (D, 200.0)]);
        assert_eq!(graph.neighbors(E).count(), 0);
    }

    #[test]
    fn test_nearest_node_close_points() {
        let graph = square_graph();

        assert_eq!(graph.nearest_node(coord! { x: 41.7001, y: -86.2401 }).unwrap(), A);
        assert_eq!(graph.nearest_node(coord! { x: 41.6901, y: -86.2301 }).unwrap(), D);
    }

    #[test]
    fn test_nearest_node_exact_match() {
        let graph = random_graph(3);

        for node in graph.nodes() {
            assert_eq!(graph.nearest_node(node).unwrap(), node);
        }
    }

    #[test]
    fn test_nearest_node_tie_keeps_first_inserted() {
        let mut graph = RoadGraph::new();
        graph.add_edge(coord! { x: -1.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }, 1.0);

        assert_eq!(graph.nearest_node(coord! { x: 0.0, y: 0.0 }).unwrap(), coord! { x: -1.0, y: 0.0 });
    }

    #[test]
    fn test_nearest_node_empty_graph() {
        let graph = RoadGraph::new();
        let result = graph.nearest_node(A);

        assert!(matches!(result, Err(PathfinderError::EmptyGraph)));
    }

    #[test]
    fn test_shortest_path_square() {
        let graph = square_graph();
        let route = graph.shortest_path(A, D).unwrap();

        assert_eq!(route.distance(), 200.0);
        assert_eq!(route.path().first(), Some(&D));
        assert_eq!(route.path().last(), Some(&A));
    }

    #[test]
    fn test_shortest_path_same_node() {
        let graph = square_graph();
        let route = graph.shortest_path(B, B).unwrap();

        assert_eq!(route.distance(), 0.0);
        assert_eq!(route.path(), &[B]);
    }

    #[test]
    fn test_shortest_path_unreachable() {
        let mut graph = square_graph();
        graph.add_edge(E, coord! { x: 41.61, y: -86.11 }, 10.0);

        let route = graph.shortest_path(A, E).unwrap();

        assert!(route.distance().is_infinite());
        assert!(route.path().is_empty());
    }

    #[test]
    fn test_shortest_path_unknown_endpoint() {
        let graph = square_graph();
        let result = graph.shortest_path(A, E);

        assert!(matches!(result, Err(PathfinderError::NodeNotFound { .. })));
    }

    #[test]
    fn test_shortest_path_symmetry() {
        for seed in 0..5 {
            let graph = random_graph(seed);
            let nodes: Vec<_> = graph.nodes().collect();
            let mut rng = StdRng::seed_from_u64(seed + 100);

            for _ in 0..20 {
                let a = nodes[rng.random_range(0..nodes.len())];
                let b = nodes[rng.random_range(0..nodes.len())];

                let forward = graph.shortest_path(a, b).unwrap();
                let backward = graph.shortest_path(b, a).unwrap();

                assert_eq!(forward.is_reachable(), backward.is_reachable());
                if forward.is_reachable() {
                    assert_relative_eq!(forward.distance(), backward.distance(), max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_path_weights_add_up_to_distance() {
        let graph = random_graph(11);
        let nodes: Vec<_> = graph.nodes().collect();

        for &target in &nodes {
            let route = graph.shortest_path(nodes[0], target).unwrap();
            if !route.is_reachable() {
                continue;
            }

            let total: f64 = route
                .path()
                .windows(2)
                .map(|pair| graph.weight(pair[0], pair[1]).unwrap())
                .sum();

            assert_relative_eq!(total, route.distance(), max_relative = 1e-9);
        }
    }
}
