use geo_types::Coord;
use num_traits::Float;


/// Earth's mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;


/// Latitude / longitude pair in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Graph-native coordinate: x is longitude, y is latitude
    pub fn to_coord(self) -> Coord<f64> {
        Coord { x: self.lon, y: self.lat }
    }
}

/// Geometry stores (x, y) = (lon, lat)
impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self { lat: coord.y, lon: coord.x }
    }
}


/// Great-circle distance in meters
/// https://en.wikipedia.org/wiki/Haversine_formula
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Squared Euclidean distance
pub fn squared_euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    (x1 - x2).powi(2) + (y1 - y2).powi(2)
}
