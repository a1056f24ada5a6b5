use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use route_grid::prelude::*;
use route_grid_examples::{describe, init_tracing};

/// Generate a corridor grid, exclude cells inside GeoJSON polygons, write cells as JSON.
#[derive(Parser)]
#[command(name = "corridor-grid-exclusions")]
struct Args {
    /// GeoJSON FeatureCollection with Polygon / MultiPolygon exclusion features.
    #[arg(long)]
    polygons: PathBuf,
    /// Origin latitude, DMS (e.g. "N 1°16'12\"").
    #[arg(long, default_value = "N 1°16'12\"")]
    origin_lat: String,
    /// Origin longitude, DMS.
    #[arg(long, default_value = "E103°52'00\"")]
    origin_lon: String,
    /// Destination latitude, DMS.
    #[arg(long, default_value = "N 1°14'44\"")]
    dest_lat: String,
    /// Destination longitude, DMS.
    #[arg(long, default_value = "E103°58'12\"")]
    dest_lon: String,
    /// Vessel length in meters.
    #[arg(long, default_value_t = 15.0)]
    vessel_length: f64,
    /// Output file for the cells.
    #[arg(long, default_value = "grids.json")]
    out: PathBuf,
    /// Mark exclusions on the calling thread only.
    #[arg(long)]
    sequential: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let origin = Coordinate::from_dms(&args.origin_lat, &args.origin_lon)?;
    let destination = Coordinate::from_dms(&args.dest_lat, &args.dest_lon)?;

    let file = File::open(&args.polygons)
        .with_context(|| format!("opening {}", args.polygons.display()))?;
    let collection = FeatureCollection::from_reader(BufReader::new(file))?;

    for (name, polygon) in extract_all_polygons(&collection) {
        tracing::info!("Feature '{}': {} coordinates.", name, polygon.len());
    }
    let polygons = polygons_from_collection(&collection);

    let config = GridConfig::new(origin, destination)
        .with_vessel_length_m(args.vessel_length)
        .with_parallel_exclusions(!args.sequential);
    let generator = GridGenerator::try_new(config)?;
    let (result, summary) = generator.run(&polygons);

    let out = File::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    let mut writer = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut writer, &result.cells)?;
    writer.flush()?;

    println!("{}", describe(&result));
    println!(
        "{} of {} checked cells excluded; wrote {}",
        summary.cells_excluded,
        summary.cells_checked,
        args.out.display()
    );

    Ok(())
}
