//! Geographic primitives: [`Coordinate`], spherical distance math, and DMS parsing.
use glam::DVec2;
use mint::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod dms;
pub mod spherical;

pub use dms::parse_dms;
pub use spherical::{
    degrees_to_radians, haversine_distance_m, radians_to_degrees, EARTH_RADIUS_M,
    HAVERSINE_INFLATION, METERS_PER_DEGREE_LAT,
};

/// A point in decimal degrees.
///
/// Ranges are not enforced; out-of-range values propagate through the math unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate from a latitude and a longitude DMS string, e.g.
    /// `("N 1°16'12\"", "E103°52'00\"")`.
    pub fn from_dms(latitude: &str, longitude: &str) -> Result<Self> {
        Ok(Self::new(parse_dms(latitude)?, parse_dms(longitude)?))
    }

    /// Arithmetic mean of two points in degree space (not the geodesic midpoint).
    pub fn midpoint(a: Coordinate, b: Coordinate) -> Self {
        Self::new(
            (a.latitude + b.latitude) / 2.0,
            (a.longitude + b.longitude) / 2.0,
        )
    }

    /// Inflated haversine distance to `other`, in meters.
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        haversine_distance_m(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl From<Coordinate> for Vector2<f64> {
    fn from(c: Coordinate) -> Self {
        Vector2 {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

impl From<Vector2<f64>> for Coordinate {
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.y, v.x)
    }
}

impl From<Coordinate> for DVec2 {
    fn from(c: Coordinate) -> Self {
        DVec2::new(c.longitude, c.latitude)
    }
}

impl From<DVec2> for Coordinate {
    fn from(v: DVec2) -> Self {
        Self::new(v.y, v.x)
    }
}
