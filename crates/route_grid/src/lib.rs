#![forbid(unsafe_code)]
//! route_grid: circular waypoint-cell grids over a route corridor, with exclusion
//! polygons marking cells that must not be used.
//!
//! Modules:
//! - geo: coordinates, scaled haversine distance, DMS text parsing
//! - polygon: exclusion rings, bounding boxes, point-in-polygon, GeoJSON feature extraction
//! - grid: cells, run configuration, circular layout, exclusion marking, events
//!
//! The crate does no file or network I/O; callers load polygons and persist cells.
pub mod error;
pub mod geo;
pub mod grid;
pub mod polygon;

/// Convenient re-exports for common types. Import with `use route_grid::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geo::{haversine_distance_m, parse_dms, Coordinate};
    pub use crate::grid::events::{
        EventSink, FnSink, GridEvent, GridEventKind, MultiSink, VecSink,
    };
    pub use crate::grid::{
        cell_size_degrees, generate_grid, mark_inside_exclusions,
        mark_inside_exclusions_sequential, valid_cells, Cell, CellId, ExclusionSummary,
        GridConfig, GridGenerator, GridResult,
    };
    pub use crate::polygon::{
        extract_all_polygons, polygon_coordinates, polygons_from_collection, BoundingBox,
        ExclusionPolygon, Feature, FeatureCollection, Geometry,
    };
}
