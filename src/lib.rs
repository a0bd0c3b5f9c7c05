pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod poi;
pub mod route;
mod collections;

pub use errors::{PathfinderError, Result};
pub use geometry::{GeoPoint, haversine_distance};
pub use graph::{RoadGraph, builder::GraphBuilder};
pub use poi::{EndpointMode, PoiTable, parse_coordinate};
pub use route::{Route, find_route};
