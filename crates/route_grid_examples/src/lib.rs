#![forbid(unsafe_code)]

use route_grid::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One-line description of a generated grid.
pub fn describe(result: &GridResult) -> String {
    let valid = valid_cells(&result.cells).count();
    format!(
        "{} cells ({} valid) over {} rings | center ({:.5}, {:.5}) | radius {:.1} m",
        result.cells.len(),
        valid,
        result.rings,
        result.corridor_center.latitude,
        result.corridor_center.longitude,
        result.corridor_radius_m,
    )
}
