use thiserror::Error;

pub type Result<T> = std::result::Result<T, PathfinderError>;

#[derive(Debug, Error)]
pub enum PathfinderError {
    #[error("geometry input contained no line segments")]
    EmptyGeometry, // Nothing to build a graph from

    #[error("cannot locate a nearest node in an empty graph")]
    EmptyGraph,

    #[error("({x}, {y}) is not a node of the graph")]
    NodeNotFound { x: f64, y: f64 },

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("malformed coordinate '{0}', expected 'lat,lon'")]
    MalformedCoordinate(String),

    #[error("malformed POI entry on line {line}: {reason}")]
    MalformedPoi { line: usize, reason: String },

    #[error("failed to read POI table: {0}")]
    Io(#[from] std::io::Error),

    #[error("search map has no node at index {0}")]
    InvalidNodeIndex(usize), // Broken predecessor chain
}
