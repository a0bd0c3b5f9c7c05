use crate::errors::Result;
use crate::collections::FxIndexMap;
use super::{GraphNodeMap, shortest_path};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use log::trace;
use rustc_hash::FxHashSet;


/// Outcome of a single-source search towards a goal
#[derive(Clone, Debug, PartialEq)]
pub enum Search<N, C> {
    /// Total cost and the path ordered goal -> start
    Found { cost: C, path: Vec<N> },
    Unreachable,
}


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until a node meets goal criteria
/// Edge costs must be non-negative
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<Search<N, C>>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    match goal_index {
        Some(goal_index) => {
            let path = shortest_path(&node_map, goal_index)?;
            let cost = node_map[goal_index].1;
            Ok(Search::Found { cost, path })
        }
        None => Ok(Search::Unreachable),
    }
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their parent and best known cost, along with the index of the goal node
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest, NodeId reverses it
    // Stale entries stay in the heap and are skipped once their node is finalized
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: GraphNodeMap<N, C> = FxIndexMap::default();

    // Nodes whose cost is final
    let mut finalized: FxHashSet<usize> = FxHashSet::default();

    let start_index = nodes_map.insert_full(start, (usize::MAX, Zero::zero())).0;
    nodes_to_visit.push(NodeId {
        index: start_index,
        cost: Zero::zero(),
    });

    while let Some(NodeId { cost, index }) = nodes_to_visit.pop() {

        if !finalized.insert(index) {
            continue;
        }

        let Some((node, _)) = nodes_map.get_index(index) else {
            continue;
        };

        // Nothing cheaper can remain in the queue once the goal is finalized
        if goal_fn(node) {
            trace!("goal {node:?} finalized at cost {cost:?}");
            return (nodes_map, Some(index));
        }

        let successors = neighbors(node);

        for (neighbor, edge_cost) in successors {

            let new_cost = cost + edge_cost;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    let neighbor_index = e.index();
                    e.insert((index, new_cost));
                    neighbor_index
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    (nodes_map, None)
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}
