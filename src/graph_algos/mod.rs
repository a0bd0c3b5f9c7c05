pub mod dijkstra;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

/// Type alias for the node map used by the search
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the best known cost to reach this node from the start
pub(crate) type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;
