//! Runs a search on a GeoJSON-style polygon and logs every improvement.
//!
//! Run with: cargo run --example debug -- [path/to/polygon.json] [precision]
//!
//! The file holds an array of rings, each an array of `[x, y]` pairs, with the
//! outer ring first. Defaults to the lake fixture at precision 1.

use polylabel::distance::EdgeIndex;
use polylabel::{Polygon, Polylabel, PolylabelOptions, ProgressLog};
use std::error::Error;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/lake.json").to_string());
    let precision: f64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 1.0,
    };

    let rings: Vec<Vec<[f64; 2]>> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let polygon = Polygon::from_coords(rings)?;
    tracing::info!(path = %path, rings = polygon.rings().len(), edges = polygon.num_edges(), "loaded polygon");

    let searcher = Polylabel::new(PolylabelOptions::new(precision));

    let start = Instant::now();
    let mut log = ProgressLog::new();
    let pole = searcher.find_with(&polygon, &polygon, &mut log)?;
    let brute = start.elapsed();

    let start = Instant::now();
    let index = EdgeIndex::new(&polygon);
    let indexed = searcher.find_with(&polygon, &index, &mut ())?;
    let with_index = start.elapsed();

    println!(
        "pole: ({:.4}, {:.4}) distance {:.4}",
        pole.point.x, pole.point.y, pole.distance
    );
    println!(
        "probes: {}, improvements: {}, converged: {}",
        pole.probes,
        log.improvements.len(),
        pole.converged
    );
    println!("brute force: {:?}, indexed: {:?}", brute, with_index);
    if indexed != pole {
        println!("warning: indexed search disagrees: {:?}", indexed);
    }

    Ok(())
}
