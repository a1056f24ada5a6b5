//! Feature-collection model for exclusion polygons.
//!
//! Geometry is resolved into [`Geometry`] once, while deserializing. Coordinates
//! arrive as GeoJSON `[longitude, latitude, ...]` positions and are stored as
//! [`Coordinate`]s (latitude first). A feature whose geometry cannot be
//! interpreted still deserializes; its shape mismatch is recorded in
//! [`Geometry::Malformed`] or [`Geometry::Unsupported`] instead of failing the
//! whole document.
use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::geo::Coordinate;

/// One ring of a polygon, latitude first.
pub type Ring = Vec<Coordinate>;

/// A collection of features, as found in a GeoJSON `FeatureCollection` document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".into(),
            features,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            properties: None,
            geometry,
        }
    }

    /// Sets the `name` property.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert("name".into(), Value::String(name.into()));
        self
    }

    /// The `name` property. Strings are returned as-is, other non-null values as
    /// their JSON text.
    pub fn name(&self) -> Option<String> {
        match self.properties.as_ref()?.get("name")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Geometry of a feature, resolved at deserialization time.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Geometry {
    /// Outer ring followed by any holes.
    Polygon(Vec<Ring>),
    /// Parts, each an outer ring followed by any holes.
    MultiPolygon(Vec<Vec<Ring>>),
    /// A geometry type that does not describe an area (points, lines, ...).
    Unsupported { kind: String },
    /// A polygonal type tag whose coordinates do not have the expected nesting.
    Malformed { kind: String, reason: String },
    /// `null` or absent geometry.
    #[default]
    Missing,
}

impl Geometry {
    /// The type tag this geometry was read from.
    pub fn kind(&self) -> &str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Unsupported { kind } | Geometry::Malformed { kind, .. } => kind.as_str(),
            Geometry::Missing => "",
        }
    }

    fn from_json(value: Value) -> Self {
        let mut object = match value {
            Value::Null => return Geometry::Missing,
            Value::Object(object) => object,
            other => {
                return Geometry::Malformed {
                    kind: String::new(),
                    reason: format!("geometry is not an object: {other}"),
                }
            }
        };

        let kind = match object.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            _ => {
                return Geometry::Malformed {
                    kind: String::new(),
                    reason: "geometry has no string 'type'".into(),
                }
            }
        };
        let coordinates = object.remove("coordinates").unwrap_or(Value::Null);

        if kind.eq_ignore_ascii_case("Polygon") {
            match serde_json::from_value::<Vec<Vec<Vec<f64>>>>(coordinates) {
                Ok(rings) => Geometry::Polygon(rings.into_iter().map(to_ring).collect()),
                Err(e) => Geometry::Malformed {
                    kind,
                    reason: e.to_string(),
                },
            }
        } else if kind.eq_ignore_ascii_case("MultiPolygon") {
            match serde_json::from_value::<Vec<Vec<Vec<Vec<f64>>>>>(coordinates) {
                Ok(parts) => Geometry::MultiPolygon(
                    parts
                        .into_iter()
                        .map(|rings| rings.into_iter().map(to_ring).collect())
                        .collect(),
                ),
                Err(e) => Geometry::Malformed {
                    kind,
                    reason: e.to_string(),
                },
            }
        } else {
            Geometry::Unsupported { kind }
        }
    }
}

impl From<Value> for Geometry {
    fn from(value: Value) -> Self {
        Geometry::from_json(value)
    }
}

/// Swaps `[lon, lat, ...]` positions to latitude-first, ignoring extra ordinates
/// and skipping positions with fewer than two numbers.
fn to_ring(positions: Vec<Vec<f64>>) -> Ring {
    positions
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coordinate::new(p[1], p[0]))
        .collect()
}
