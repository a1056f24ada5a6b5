//! Turning features into exclusion rings.
//!
//! Each feature yields exactly one ring: a `Polygon` contributes its outer ring
//! (holes are ignored) and a `MultiPolygon` contributes every ring of every part,
//! concatenated in document order. Anything else yields an empty ring so one bad
//! feature does not abort the load.
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::polygon::geojson::{Feature, FeatureCollection, Geometry};
use crate::polygon::ExclusionPolygon;

/// Prefix for features without a usable `name` property.
pub const UNNAMED_PREFIX: &str = "Unnamed_";

/// Extracts the exclusion ring of a single feature.
pub fn polygon_coordinates(feature: &Feature) -> ExclusionPolygon {
    let vertices = match &feature.geometry {
        Geometry::Polygon(rings) => rings.first().cloned().unwrap_or_default(),
        Geometry::MultiPolygon(parts) => parts.iter().flatten().flatten().copied().collect(),
        Geometry::Unsupported { kind } => {
            warn!("Unsupported geometry type '{}'; using an empty ring.", kind);
            Vec::new()
        }
        Geometry::Malformed { kind, reason } => {
            warn!(
                "Malformed '{}' geometry ({}); using an empty ring.",
                kind, reason
            );
            Vec::new()
        }
        Geometry::Missing => Vec::new(),
    };
    ExclusionPolygon::new(vertices)
}

/// Extracts one ring per feature, in feature order.
pub fn polygons_from_collection(collection: &FeatureCollection) -> Vec<ExclusionPolygon> {
    collection.features.iter().map(polygon_coordinates).collect()
}

/// Maps every feature's name to its ring.
///
/// Features without a name are keyed `Unnamed_<n>`, where `n` is the feature's
/// 1-based position in the collection. A repeated name replaces the earlier entry.
pub fn extract_all_polygons(collection: &FeatureCollection) -> HashMap<String, ExclusionPolygon> {
    let mut result = HashMap::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let name = feature
            .name()
            .unwrap_or_else(|| format!("{UNNAMED_PREFIX}{}", index + 1));
        let polygon = polygon_coordinates(feature);
        debug!("Feature '{}': {} coordinates.", name, polygon.len());

        if result.insert(name.clone(), polygon).is_some() {
            warn!("Duplicate feature name '{}'; keeping the later ring.", name);
        }
    }

    result
}
