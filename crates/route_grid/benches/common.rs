use std::time::Duration;

use criterion::{Criterion, Throughput};
use route_grid::prelude::*;

/// Singapore Strait corridor used by every benchmark.
pub const ORIGIN: Coordinate = Coordinate::new(1.2700, 103.8667);
pub const DESTINATION: Coordinate = Coordinate::new(1.2456, 103.9700);

/// Layout and marking are sub-millisecond, so more samples over a shorter window.
pub fn grid_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(50)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
}

pub fn corridor_generator(vessel_length_m: f64) -> GridGenerator {
    GridGenerator::new(GridConfig::new(ORIGIN, DESTINATION).with_vessel_length_m(vessel_length_m))
}

/// Throughput in cells per iteration.
pub fn cell_throughput(cells: &[Cell]) -> Throughput {
    Throughput::Elements(cells.len().max(1) as u64)
}
