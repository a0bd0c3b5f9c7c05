use crate::errors::Result;
use crate::graph::RoadGraph;

use geo_types::{Coord, LineString};
use log::{debug, info};


/// Result of a shortest path search
/// path is ordered end -> start, exactly as the search walked it back
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    distance: f64, // meters, infinite when unreachable
    path: Vec<Coord<f64>>,
}

impl Route {

    pub(crate) fn new(distance: f64, path: Vec<Coord<f64>>) -> Self {
        Self { distance, path }
    }

    pub(crate) fn unreachable() -> Self {
        Self { distance: f64::INFINITY, path: Vec::new() }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Nodes from end back to start
    pub fn path(&self) -> &[Coord<f64>] {
        &self.path
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Coord<f64>> {
        self.path.last().copied()
    }

    pub fn end(&self) -> Option<Coord<f64>> {
        self.path.first().copied()
    }

    /// Nodes in travel order, for display
    pub fn source_to_target(&self) -> impl DoubleEndedIterator<Item = Coord<f64>> + '_ {
        self.path.iter().rev().copied()
    }

    /// Travel-order geometry for a renderer
    pub fn to_line_string(&self) -> LineString<f64> {
        self.source_to_target().collect()
    }

    pub fn into_parts(self) -> (f64, Vec<Coord<f64>>) {
        (self.distance, self.path)
    }
}


/// Snap both endpoints onto the graph and find the shortest route between them
/// from and to are in the graph's axis order, (lon, lat) for geographic data
pub fn find_route(graph: &RoadGraph, from: Coord<f64>, to: Coord<f64>) -> Result<Route> {
    let start = graph.nearest_node(from)?;
    let end = graph.nearest_node(to)?;
    info!("start: {start:?} end: {end:?}");

    let route = graph.shortest_path(start, end)?;
    if route.is_reachable() {
        info!("length: {:.1} m over {} hops", route.distance(), route.hops());
    } else {
        debug!("no path between {start:?} and {end:?}");
    }

    Ok(route)
}
