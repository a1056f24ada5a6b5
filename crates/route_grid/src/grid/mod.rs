//! Waypoint-cell grids laid out over a route corridor.
//!
//! [`generator`] lays out concentric rings of [`Cell`]s around the corridor
//! midpoint; [`exclusion`] flips cells inside exclusion polygons to invalid.
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

pub mod config;
pub mod events;
pub mod exclusion;
pub mod generator;

pub use config::GridConfig;
pub use exclusion::{mark_inside_exclusions, mark_inside_exclusions_sequential, ExclusionSummary};
pub use generator::{cell_size_degrees, generate_grid, GridGenerator, GridResult};

/// Identity of a cell: its global id plus ring and position-in-ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    /// Sequential id, starting at 1, in discovery order.
    pub id: u64,
    /// Ring index, 0 at the corridor center.
    pub ring: u32,
    /// Index of the point on its ring.
    pub position: u32,
}

/// A candidate waypoint location.
///
/// Scores are left at zero by this crate; only `valid` changes after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(flatten)]
    pub id: CellId,
    pub center: Coordinate,
    /// Angular extent in degrees.
    pub cell_size: f64,
    pub valid: bool,
    pub distance_value: i32,
    pub risk_value: i32,
    pub efficiency_value: i32,
    pub overall_value: i32,
}

impl Cell {
    pub fn new(id: CellId, center: Coordinate, cell_size: f64) -> Self {
        Self {
            id,
            center,
            cell_size,
            valid: true,
            distance_value: 0,
            risk_value: 0,
            efficiency_value: 0,
            overall_value: 0,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn center(&self) -> Coordinate {
        self.center
    }
}

/// Iterates over the cells that were not excluded.
pub fn valid_cells(cells: &[Cell]) -> impl Iterator<Item = &Cell> {
    cells.iter().filter(|c| c.valid)
}
