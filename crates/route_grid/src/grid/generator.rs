//! Circular grid layout over a route corridor.
//!
//! The corridor is a circle centered on the degree-space midpoint of origin and
//! destination, with a radius equal to the scaled haversine distance between
//! them. Rings are spaced two step radii apart; each ring carries as many cells
//! as fit its circumference at that spacing. Candidates are placed with a planar
//! meters-to-degrees approximation and then re-checked against the corridor
//! radius, which keeps the field circular.
use std::f64::consts::TAU;

use glam::DVec2;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::geo::{degrees_to_radians, Coordinate, METERS_PER_DEGREE_LAT};
use crate::grid::config::GridConfig;
use crate::grid::events::{EventSink, GridEvent, GridEventKind};
use crate::grid::exclusion::{self, ExclusionSummary};
use crate::grid::{Cell, CellId};
use crate::polygon::ExclusionPolygon;

/// Meters added to the vessel length to get the step radius.
pub const STEP_PADDING_M: f64 = 50.0;
pub const MIN_CELL_SIZE_DEG: f64 = 0.0001;
pub const MAX_CELL_SIZE_DEG: f64 = 0.01;

/// Cell size in degrees for a vessel footprint, clamped to
/// [`MIN_CELL_SIZE_DEG`, `MAX_CELL_SIZE_DEG`].
pub fn cell_size_degrees(vessel_length_m: f64) -> f64 {
    ((vessel_length_m + STEP_PADDING_M) / METERS_PER_DEGREE_LAT)
        .clamp(MIN_CELL_SIZE_DEG, MAX_CELL_SIZE_DEG)
}

/// Result of laying out a grid.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct GridResult {
    /// Cells in discovery order (ring by ring, then by position on the ring).
    pub cells: Vec<Cell>,
    /// Number of rings visited, including rings that kept no cells.
    pub rings: u32,
    /// Candidate positions computed.
    pub candidates_evaluated: usize,
    /// Candidates dropped for lying outside the corridor radius.
    pub candidates_discarded: usize,
    pub corridor_center: Coordinate,
    pub corridor_radius_m: f64,
}

/// Runs grid layout and exclusion marking for one corridor.
pub struct GridGenerator {
    config: GridConfig,
}

impl GridGenerator {
    pub fn try_new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn new(config: GridConfig) -> Self {
        debug_assert!(
            config.vessel_length_m.is_finite() && config.vessel_length_m >= 0.0,
            "vessel_length_m must be finite and >= 0"
        );
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Lays out the grid.
    pub fn generate(&self) -> GridResult {
        layout(&self.config, &mut ())
    }

    pub fn generate_with_events(&self, sink: &mut dyn EventSink) -> GridResult {
        layout(&self.config, sink)
    }

    /// Marks cells inside any of `polygons` as invalid, honoring the configured
    /// parallelism.
    pub fn mark_exclusions(
        &self,
        cells: &mut [Cell],
        polygons: &[ExclusionPolygon],
    ) -> ExclusionSummary {
        self.mark_exclusions_with_events(cells, polygons, &mut ())
    }

    pub fn mark_exclusions_with_events(
        &self,
        cells: &mut [Cell],
        polygons: &[ExclusionPolygon],
        sink: &mut dyn EventSink,
    ) -> ExclusionSummary {
        if sink.wants(GridEventKind::ExclusionStarted) {
            sink.send(GridEvent::ExclusionStarted {
                cells: cells.len(),
                polygons: polygons.len(),
            });
        }

        let summary = if self.config.parallel_exclusions {
            exclusion::mark_inside_exclusions(cells, polygons)
        } else {
            exclusion::mark_inside_exclusions_sequential(cells, polygons)
        };

        if sink.wants(GridEventKind::ExclusionFinished) {
            sink.send(GridEvent::ExclusionFinished { summary });
        }
        summary
    }

    /// Lays out the grid and marks exclusions in one call.
    pub fn run(&self, polygons: &[ExclusionPolygon]) -> (GridResult, ExclusionSummary) {
        let mut result = self.generate();
        let summary = self.mark_exclusions(&mut result.cells, polygons);
        (result, summary)
    }
}

/// Lays out the circular grid between two points for a vessel of the given length.
pub fn generate_grid(
    origin_lat: f64,
    origin_lon: f64,
    dest_lat: f64,
    dest_lon: f64,
    vessel_length_m: f64,
) -> Result<Vec<Cell>> {
    let config = GridConfig::new(
        Coordinate::new(origin_lat, origin_lon),
        Coordinate::new(dest_lat, dest_lon),
    )
    .with_vessel_length_m(vessel_length_m);
    Ok(GridGenerator::try_new(config)?.generate().cells)
}

fn layout(config: &GridConfig, sink: &mut dyn EventSink) -> GridResult {
    let center = Coordinate::midpoint(config.origin, config.destination);
    let corridor_radius_m = config.origin.distance_m(&config.destination);

    if sink.wants(GridEventKind::GenerationStarted) {
        sink.send(GridEvent::GenerationStarted {
            config: config.clone(),
            corridor_radius_m,
        });
    }

    let mut result = GridResult {
        corridor_center: center,
        corridor_radius_m,
        ..Default::default()
    };

    if !corridor_radius_m.is_finite() {
        warn_empty(sink, "corridor", format!("corridor radius is {corridor_radius_m}"));
        return result;
    }

    let step_m = config.vessel_length_m + STEP_PADDING_M;
    let ring_spacing_m = 2.0 * step_m;
    // Rings must move outward or the loop below never reaches the corridor edge.
    if !(ring_spacing_m.is_finite() && ring_spacing_m > 0.0) {
        warn_empty(sink, "vessel", format!("ring spacing is {ring_spacing_m} m"));
        return result;
    }
    let meters_per_degree_lon = METERS_PER_DEGREE_LAT * degrees_to_radians(center.latitude).cos();
    let cell_size = (step_m / METERS_PER_DEGREE_LAT).max(step_m / meters_per_degree_lon);

    let mut next_id: u64 = 1;
    let mut ring: u32 = 0;
    loop {
        let radius_m = f64::from(ring) * ring_spacing_m;
        if !(radius_m <= corridor_radius_m) {
            break;
        }

        let points_on_ring = ((TAU * radius_m / ring_spacing_m).floor() as u32).max(1);
        let mut emitted = 0;
        let mut discarded = 0;

        for position in 0..points_on_ring {
            let angle = TAU * f64::from(position) / f64::from(points_on_ring);
            let offset = DVec2::from_angle(angle) * radius_m;
            let candidate = Coordinate::new(
                center.latitude + offset.y / METERS_PER_DEGREE_LAT,
                center.longitude + offset.x / meters_per_degree_lon,
            );

            if center.distance_m(&candidate) > corridor_radius_m {
                discarded += 1;
                continue;
            }

            let id = CellId {
                id: next_id,
                ring,
                position,
            };
            next_id += 1;
            result.cells.push(Cell::new(id, candidate, cell_size));
            emitted += 1;
        }

        debug!(
            "Ring {} at {:.1} m: {} cells, {} discarded.",
            ring, radius_m, emitted, discarded
        );
        if sink.wants(GridEventKind::RingCompleted) {
            sink.send(GridEvent::RingCompleted {
                ring,
                radius_m,
                emitted,
                discarded,
            });
        }

        result.candidates_evaluated += emitted + discarded;
        result.candidates_discarded += discarded;
        ring += 1;
    }
    result.rings = ring;

    info!(
        "Generated {} cells over {} rings | corridor radius {:.1} m.",
        result.cells.len(),
        result.rings,
        corridor_radius_m
    );
    if sink.wants(GridEventKind::GenerationFinished) {
        sink.send(GridEvent::GenerationFinished {
            cells: result.cells.len(),
            rings: result.rings,
        });
    }

    result
}

fn warn_empty(sink: &mut dyn EventSink, context: &str, message: String) {
    warn!("{}; no cells generated.", message);
    if sink.wants(GridEventKind::Warning) {
        sink.send(GridEvent::Warning {
            context: context.into(),
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;
    use crate::error::Error;
    use crate::grid::events::VecSink;

    const ORIGIN: Coordinate = Coordinate::new(1.2700, 103.8667);
    const DESTINATION: Coordinate = Coordinate::new(1.2456, 103.9700);

    fn corridor(vessel_length_m: f64) -> GridResult {
        GridGenerator::try_new(
            GridConfig::new(ORIGIN, DESTINATION).with_vessel_length_m(vessel_length_m),
        )
        .expect("valid config")
        .generate()
    }

    #[test]
    fn cell_size_is_clamped() {
        assert!((cell_size_degrees(0.0) - 50.0 / 111_320.0).abs() < 1e-15);
        assert!((cell_size_degrees(15.0) - 65.0 / 111_320.0).abs() < 1e-15);
        assert_eq!(cell_size_degrees(5000.0), MAX_CELL_SIZE_DEG);
        assert_eq!(cell_size_degrees(1_000_000.0), MAX_CELL_SIZE_DEG);
        assert_eq!(cell_size_degrees(-1000.0), MIN_CELL_SIZE_DEG);
    }

    #[test]
    fn cell_size_is_monotonic() {
        let lengths = [0.0, 15.0, 100.0, 500.0, 1000.0, 5000.0, 1_000_000.0];
        for pair in lengths.windows(2) {
            let (a, b) = (cell_size_degrees(pair[0]), cell_size_degrees(pair[1]));
            assert!(a <= b);
            assert!((MIN_CELL_SIZE_DEG..=MAX_CELL_SIZE_DEG).contains(&a));
        }
    }

    #[test]
    fn end_to_end_corridor() {
        let result = corridor(15.0);
        assert!(!result.cells.is_empty());
        assert!((result.corridor_center.latitude - 1.2578).abs() < 1e-9);
        assert!((result.corridor_center.longitude - 103.91835).abs() < 1e-9);

        let first = &result.cells[0];
        assert_eq!((first.id.id, first.id.ring, first.id.position), (1, 0, 0));
        assert!((first.center.latitude - 1.2578).abs() < 1e-9);
        assert!((first.center.longitude - 103.91835).abs() < 1e-9);

        let max_distance = result
            .cells
            .iter()
            .map(|c| result.corridor_center.distance_m(&c.center))
            .fold(0.0_f64, f64::max);
        assert!(max_distance <= result.corridor_radius_m + 1e-6);
    }

    #[test]
    fn center_ring_has_exactly_one_cell() {
        let result = corridor(15.0);
        let center_cells: Vec<&Cell> = result.cells.iter().filter(|c| c.id.ring == 0).collect();
        assert_eq!(center_cells.len(), 1);
    }

    #[test]
    fn ids_are_sequential_in_ring_order() {
        let result = corridor(15.0);
        for (i, c) in result.cells.iter().enumerate() {
            assert_eq!(c.id.id, i as u64 + 1);
        }
        for pair in result.cells.windows(2) {
            let (a, b) = (pair[0].id, pair[1].id);
            assert!(a.ring < b.ring || (a.ring == b.ring && a.position < b.position));
        }
    }

    #[test]
    fn ring_sizes_follow_circumference() {
        let result = corridor(15.0);
        // Ring 1 sits at 130 m with 130 m spacing: floor(2 * pi) = 6 points.
        let ring_one = result.cells.iter().filter(|c| c.id.ring == 1).count();
        assert_eq!(ring_one, 6);
        assert_eq!(
            result.candidates_evaluated,
            result.cells.len() + result.candidates_discarded
        );
    }

    #[test]
    fn cells_share_the_larger_step_size() {
        let result = corridor(15.0);
        let lon_step = 65.0 / (111_320.0 * 1.2578_f64.to_radians().cos());
        for c in &result.cells {
            assert!((c.cell_size - lon_step).abs() < 1e-15);
            assert!(c.valid);
            assert_eq!(c.overall_value, 0);
        }
    }

    #[test]
    fn identical_endpoints_yield_single_center_cell() {
        let result = GridGenerator::new(GridConfig::new(ORIGIN, ORIGIN)).generate();
        assert_eq!(result.cells.len(), 1);
        assert_eq!(result.rings, 1);
        assert_eq!(result.cells[0].center, ORIGIN);
    }

    #[test]
    fn every_cell_is_within_corridor_for_random_corridors() {
        let mut rng = StdRng::seed_from_u64(0x5EA_u64);
        for _ in 0..20 {
            let origin = Coordinate::new(rng.random_range(-60.0..60.0), rng.random_range(-170.0..170.0));
            let destination = Coordinate::new(
                origin.latitude + rng.random_range(-0.05..0.05),
                origin.longitude + rng.random_range(-0.05..0.05),
            );
            let vessel = rng.random_range(0.0..300.0);
            let result = GridGenerator::new(
                GridConfig::new(origin, destination).with_vessel_length_m(vessel),
            )
            .generate();

            assert!(!result.cells.is_empty());
            let center = result.corridor_center;
            assert_eq!(result.cells[0].center, center);
            for c in &result.cells {
                assert!(center.distance_m(&c.center) <= result.corridor_radius_m + 1e-6);
            }
        }
    }

    #[test]
    fn generate_grid_rejects_negative_length() {
        let err = generate_grid(1.27, 103.8667, 1.2456, 103.97, -5.0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        let cells = generate_grid(1.27, 103.8667, 1.2456, 103.97, 15.0).expect("valid");
        assert_eq!(cells, corridor(15.0).cells);
    }

    #[test]
    fn non_finite_corridor_yields_no_cells() {
        let result = GridGenerator::new(GridConfig::new(
            Coordinate::new(f64::NAN, 0.0),
            Coordinate::new(1.0, 1.0),
        ))
        .generate();
        assert!(result.cells.is_empty());
        assert_eq!(result.rings, 0);
    }

    #[test]
    fn degenerate_ring_spacing_yields_no_cells() {
        // Bypasses validation the way a deserialized config handed to `new` would.
        for vessel in [f64::NAN, f64::INFINITY, -50.0, -80.0] {
            let config = GridConfig::new(ORIGIN, DESTINATION).with_vessel_length_m(vessel);
            let mut sink = VecSink::new();
            let result = layout(&config, &mut sink);
            assert!(result.cells.is_empty(), "vessel = {vessel}");
            assert_eq!(result.rings, 0);
            assert!(sink
                .as_slice()
                .iter()
                .any(|e| matches!(e, GridEvent::Warning { context, .. } if context == "vessel")));
        }
    }

    #[test]
    fn events_report_every_ring() {
        let generator = GridGenerator::new(GridConfig::new(ORIGIN, DESTINATION));
        let mut sink = VecSink::new();
        let result = generator.generate_with_events(&mut sink);
        let events = sink.into_inner();

        assert!(matches!(events.first(), Some(GridEvent::GenerationStarted { .. })));
        assert!(matches!(
            events.last(),
            Some(GridEvent::GenerationFinished { cells, rings })
                if *cells == result.cells.len() && *rings == result.rings
        ));

        let mut emitted_total = 0;
        let mut ring_events = 0;
        for e in &events {
            if let GridEvent::RingCompleted { emitted, .. } = e {
                emitted_total += emitted;
                ring_events += 1;
            }
        }
        assert_eq!(ring_events, result.rings);
        assert_eq!(emitted_total, result.cells.len());
    }
}
