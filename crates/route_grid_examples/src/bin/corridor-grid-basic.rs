use route_grid::prelude::*;
use route_grid_examples::{describe, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Corridor endpoints as supplied by a route request.
    let origin = Coordinate::from_dms("N 1°16'12\"", "E103°52'00\"")?;
    let destination = Coordinate::from_dms("N 1°14'44\"", "E103°58'12\"")?;
    let vessel_length_m = 15.0;

    let config = GridConfig::new(origin, destination).with_vessel_length_m(vessel_length_m);
    let generator = GridGenerator::try_new(config)?;

    // Collect ring-level progress without per-ring noise in the log.
    let mut sink = FnSink::new(|event| {
        if let GridEvent::RingCompleted {
            ring,
            emitted,
            discarded,
            ..
        } = event
        {
            if discarded > 0 {
                tracing::info!(ring, emitted, discarded, "ring clipped by corridor");
            }
        }
    });
    let result = generator.generate_with_events(&mut sink);

    println!(
        "cell size for {vessel_length_m} m vessel: {:.6} deg",
        cell_size_degrees(vessel_length_m)
    );
    println!("{}", describe(&result));

    Ok(())
}
