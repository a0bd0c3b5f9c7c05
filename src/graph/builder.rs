use crate::errors::{PathfinderError, Result};
use crate::geometry::{GeoPoint, haversine_distance};
use super::RoadGraph;

use std::borrow::Borrow;
use geo_types::{Geometry, Line, LineString, MultiLineString};
use log::{debug, info};


/// Builds a RoadGraph from line geometries
/// Every segment between consecutive points becomes an undirected edge weighted by haversine distance
/// Points are read as (x, y) = (lon, lat)
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: RoadGraph,
    skipped: usize,
}

impl GraphBuilder {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sequence of points, fewer than 2 points adds nothing
    pub fn add_line_string(&mut self, line_string: &LineString<f64>) -> &mut Self {
        if line_string.0.len() < 2 {
            debug!("skipping line with {} points", line_string.0.len());
            self.skipped += 1;
            return self;
        }
        for line in line_string.lines() {
            self.add_segment(line);
        }
        self
    }

    /// Parts are independent sequences, no edge joins the end of one part to the next
    pub fn add_multi_line_string(&mut self, lines: &MultiLineString<f64>) -> &mut Self {
        for line_string in lines {
            self.add_line_string(line_string);
        }
        self
    }

    /// Line geometries are added, anything else is skipped
    pub fn add_geometry(&mut self, geometry: &Geometry<f64>) -> &mut Self {
        match geometry {
            Geometry::Line(line) => self.add_segment(*line),
            Geometry::LineString(line_string) => {
                self.add_line_string(line_string);
            }
            Geometry::MultiLineString(lines) => {
                self.add_multi_line_string(lines);
            }
            Geometry::GeometryCollection(collection) => {
                for geometry in collection {
                    self.add_geometry(geometry);
                }
            }
            other => {
                debug!("skipping non-line geometry {other:?}");
                self.skipped += 1;
            }
        }
        self
    }

    pub fn extend<I>(&mut self, geometries: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Borrow<Geometry<f64>>,
    {
        for geometry in geometries {
            self.add_geometry(geometry.borrow());
        }
        self
    }

    /// Geometries and line parts that contributed no edges so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Finish the graph, failing when the input held no segments
    pub fn build(self) -> Result<RoadGraph> {
        if self.graph.is_empty() {
            return Err(PathfinderError::EmptyGeometry);
        }

        info!(
            "built road graph with {} nodes and {} edges ({} geometries skipped)",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.skipped
        );

        Ok(self.graph)
    }

    fn add_segment(&mut self, line: Line<f64>) {
        let weight = haversine_distance(GeoPoint::from(line.start), GeoPoint::from(line.end));
        self.graph.add_edge(line.start, line.end, weight);
    }
}


impl RoadGraph {

    /// Build a graph from any collection of geometries
    pub fn from_geometries<I>(geometries: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Geometry<f64>>,
    {
        let mut builder = GraphBuilder::new();
        builder.extend(geometries);
        builder.build()
    }
}
