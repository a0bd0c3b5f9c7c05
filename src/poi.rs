use crate::errors::{PathfinderError, Result};
use crate::geometry::GeoPoint;

use std::{fs::File, io::{BufRead, BufReader}, path::Path, str::FromStr};
use geo_types::Coord;
use log::debug;
use rustc_hash::FxHashMap;


/// Named locations loaded from `name\tlatitude\tlongitude` lines
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoiTable {
    entries: FxHashMap<String, GeoPoint>,
}

impl PoiTable {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Blank lines are ignored, a repeated name replaces the earlier entry
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (name, point) = parse_poi_line(&line, index + 1)?;
            table.entries.insert(name, point);
        }

        debug!("loaded {} points of interest", table.len());
        Ok(table)
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, point: GeoPoint) {
        self.entries.insert(name.into(), point);
    }

    /// Spaces in the query are matched as underscores
    pub fn get(&self, name: &str) -> Result<GeoPoint> {
        self.entries
            .get(&normalize_name(name))
            .copied()
            .ok_or_else(|| PathfinderError::UnknownLocation(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for PoiTable {
    type Err = PathfinderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}


pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_")
}

fn parse_poi_line(line: &str, line_number: usize) -> Result<(String, GeoPoint)> {
    let malformed = |reason: String| PathfinderError::MalformedPoi { line: line_number, reason };

    let fields: Vec<&str> = line.split('\t').collect();
    let &[name, lat, lon] = fields.as_slice() else {
        return Err(malformed(format!("expected 3 tab-separated fields, found {}", fields.len())));
    };

    let lat = lat.trim().parse::<f64>().map_err(|e| malformed(format!("latitude '{lat}': {e}")))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| malformed(format!("longitude '{lon}': {e}")))?;

    Ok((name.to_string(), GeoPoint::new(lat, lon)))
}


/// Parse a "lat,lon" string
pub fn parse_coordinate(raw: &str) -> Result<GeoPoint> {
    let malformed = || PathfinderError::MalformedCoordinate(raw.to_string());

    let mut parts = raw.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
    let lon = lon.trim().parse::<f64>().map_err(|_| malformed())?;

    Ok(GeoPoint::new(lat, lon))
}


/// How route endpoints are entered
#[derive(Clone, Debug)]
pub enum EndpointMode {
    /// "lat,lon" strings
    Coordinates,
    /// Names looked up in a POI table
    Named(PoiTable),
}

impl EndpointMode {

    /// Resolve user input to a graph-native coordinate, x = lon and y = lat
    pub fn resolve(&self, raw: &str) -> Result<Coord<f64>> {
        let point = match self {
            EndpointMode::Coordinates => parse_coordinate(raw)?,
            EndpointMode::Named(table) => table.get(raw)?,
        };
        Ok(point.to_coord())
    }
}
