//! Exclusion polygons and the containment tests used to prune grid cells.
//!
//! A polygon is an ordered ring of [`Coordinate`]s. The ring does not need to
//! repeat its first vertex; containment walks it with a wrap-around edge.
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

pub mod extract;
pub mod geojson;

pub use extract::{extract_all_polygons, polygon_coordinates, polygons_from_collection};
pub use geojson::{Feature, FeatureCollection, Geometry, Ring};

/// Added to the vertical span of each edge so horizontal edges never divide by zero.
pub const EDGE_SPAN_EPSILON: f64 = 1e-12;

/// A ring of coordinates describing a region where cells must not be placed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionPolygon {
    pub vertices: Vec<Coordinate>,
}

impl ExclusionPolygon {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    /// Builds a polygon from `(latitude, longitude)` pairs.
    pub fn from_lat_lon(pairs: &[(f64, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(lat, lon)| Coordinate::new(lat, lon))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_coordinates(&self.vertices)
    }

    /// Even-odd ray-casting containment test.
    pub fn contains(&self, point: Coordinate) -> bool {
        point_in_ring(point, &self.vertices)
    }
}

impl From<Vec<Coordinate>> for ExclusionPolygon {
    fn from(vertices: Vec<Coordinate>) -> Self {
        Self::new(vertices)
    }
}

/// Axis-aligned latitude/longitude extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// An inverted box that contains nothing and grows to fit the first point included.
    pub const fn empty() -> Self {
        Self {
            min_lat: f64::MAX,
            max_lat: f64::MIN,
            min_lon: f64::MAX,
            max_lon: f64::MIN,
        }
    }

    pub fn from_coordinates(coords: &[Coordinate]) -> Self {
        coords.iter().fold(Self::empty(), |mut bb, c| {
            bb.include(*c);
            bb
        })
    }

    pub fn include(&mut self, c: Coordinate) {
        self.min_lat = self.min_lat.min(c.latitude);
        self.max_lat = self.max_lat.max(c.latitude);
        self.min_lon = self.min_lon.min(c.longitude);
        self.max_lon = self.max_lon.max(c.longitude);
    }

    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }

    /// Inclusive containment; edges count as inside.
    #[inline]
    pub fn contains(&self, p: Coordinate) -> bool {
        p.latitude >= self.min_lat
            && p.latitude <= self.max_lat
            && p.longitude >= self.min_lon
            && p.longitude <= self.max_lon
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Even-odd ray casting over `ring`, treating it as implicitly closed.
///
/// Longitude is the x axis and latitude the y axis. Rings with fewer than three
/// vertices enclose nothing.
pub fn point_in_ring(point: Coordinate, ring: &[Coordinate]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let (px, py) = (point.longitude, point.latitude);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].longitude, ring[i].latitude);
        let (xj, yj) = (ring[j].longitude, ring[j].latitude);

        let crosses = (yi > py) != (yj > py)
            && px < (xj - xi) * (py - yi) / (yj - yi + EDGE_SPAN_EPSILON) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}
