//! Bounding-box-pruned exclusion marking.
//!
//! Each cell is tested on its own against a shared, read-only list of prepared
//! polygons, and only that cell's `valid` flag is written. The result is the same
//! for any worker count or visiting order.
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::geo::Coordinate;
use crate::grid::Cell;
use crate::polygon::{point_in_ring, BoundingBox, ExclusionPolygon};

/// Counts from one exclusion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExclusionSummary {
    /// Cells that were valid when the pass started and were tested.
    pub cells_checked: usize,
    /// Cells flipped to invalid by this pass.
    pub cells_excluded: usize,
}

struct PreparedPolygon<'a> {
    ring: &'a [Coordinate],
    bounds: BoundingBox,
}

fn prepare(polygons: &[ExclusionPolygon]) -> Vec<PreparedPolygon<'_>> {
    polygons
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| PreparedPolygon {
            ring: &p.vertices,
            bounds: p.bounding_box(),
        })
        .collect()
}

/// First polygon (in input order) whose box and ring both contain `point`.
fn containing_polygon(point: Coordinate, prepared: &[PreparedPolygon<'_>]) -> Option<usize> {
    prepared
        .iter()
        .position(|p| p.bounds.contains(point) && point_in_ring(point, p.ring))
}

/// Tests one cell; returns `(checked, excluded)`.
#[inline]
fn mark_cell(cell: &mut Cell, prepared: &[PreparedPolygon<'_>]) -> (usize, usize) {
    if !cell.valid {
        return (0, 0);
    }
    if containing_polygon(cell.center, prepared).is_some() {
        cell.valid = false;
        (1, 1)
    } else {
        (1, 0)
    }
}

fn sum(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
    (a.0 + b.0, a.1 + b.1)
}

/// Marks every valid cell whose center lies inside any polygon as invalid, spreading
/// cells across the rayon pool.
///
/// No-op when either input is empty.
#[cfg(feature = "parallel")]
pub fn mark_inside_exclusions(cells: &mut [Cell], polygons: &[ExclusionPolygon]) -> ExclusionSummary {
    mark_with(cells, polygons, |cells, prepared| {
        cells
            .par_iter_mut()
            .map(|cell| mark_cell(cell, prepared))
            .reduce(|| (0, 0), sum)
    })
}

/// Marks every valid cell whose center lies inside any polygon as invalid. Built
/// without the `parallel` feature, so this runs on the calling thread.
///
/// No-op when either input is empty.
#[cfg(not(feature = "parallel"))]
pub fn mark_inside_exclusions(cells: &mut [Cell], polygons: &[ExclusionPolygon]) -> ExclusionSummary {
    mark_inside_exclusions_sequential(cells, polygons)
}

/// Same as [`mark_inside_exclusions`] on the calling thread.
pub fn mark_inside_exclusions_sequential(
    cells: &mut [Cell],
    polygons: &[ExclusionPolygon],
) -> ExclusionSummary {
    mark_with(cells, polygons, |cells, prepared| {
        cells
            .iter_mut()
            .map(|cell| mark_cell(cell, prepared))
            .fold((0, 0), sum)
    })
}

fn mark_with<F>(cells: &mut [Cell], polygons: &[ExclusionPolygon], pass: F) -> ExclusionSummary
where
    F: FnOnce(&mut [Cell], &[PreparedPolygon<'_>]) -> (usize, usize),
{
    if cells.is_empty() || polygons.is_empty() {
        debug!(
            "Exclusion pass skipped: {} cells, {} polygons.",
            cells.len(),
            polygons.len()
        );
        return ExclusionSummary::default();
    }

    let prepared = prepare(polygons);
    let (cells_checked, cells_excluded) = pass(cells, &prepared);

    info!(
        "Exclusion pass: {} cells checked against {} polygons | {} excluded.",
        cells_checked,
        prepared.len(),
        cells_excluded
    );

    ExclusionSummary {
        cells_checked,
        cells_excluded,
    }
}
