use crate::errors::{PathfinderError, Result};
use super::GraphNodeMap;

/// Construct the shortest path by walking parents from the goal node back to the start node
/// Returns the path as a vector of nodes ordered goal -> start
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Start node has usize::MAX as parent
    while current_index != usize::MAX {
        let Some((node, &(parent_index, _))) = node_map.get_index(current_index) else {
            return Err(PathfinderError::InvalidNodeIndex(current_index));
        };
        path.push(node.clone());
        current_index = parent_index;
    }

    Ok(path)
}
