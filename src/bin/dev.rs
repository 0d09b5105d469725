//! Earthquake Map - development entry point
//!
//! Renders the map from local GeoJSON files instead of the live feeds, so
//! layout and styling can be iterated on offline.
//!
//! Usage:
//! ```bash
//! export QUAKES_FILE=tests/fixtures/all_week_sample.geojson
//! export PLATES_FILE=tests/fixtures/plates_sample.json
//! cargo run --bin dev
//! ```
//!
//! Property overrides are read from map_config.json if present.

use anyhow::Context;
use quake_map::config::MapConfig;
use quake_map::feeds::FileSource;
use quake_map::logging;
use quake_map::pipeline;
use quake_map::profile::PhaseTimer;
use quake_map::properties::PropertyReader;
use std::path::Path;

const DEFAULT_QUAKES_FILE: &str = "tests/fixtures/all_week_sample.geojson";
const DEFAULT_PLATES_FILE: &str = "tests/fixtures/plates_sample.json";
const DEV_CONFIG_FILE: &str = "map_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("info");

    let mut timer = PhaseTimer::start("START: Development run");
    println!("=== Earthquake Map - Development Mode ===\n");

    let quakes_file =
        std::env::var("QUAKES_FILE").unwrap_or_else(|_| DEFAULT_QUAKES_FILE.to_string());
    let plates_file =
        std::env::var("PLATES_FILE").unwrap_or_else(|_| DEFAULT_PLATES_FILE.to_string());

    println!("Input files:");
    println!("  Earthquakes: {}", quakes_file);
    println!("  Plates: {}", plates_file);
    println!();

    let config = load_dev_config()?;
    println!("Configuration loaded:");
    println!("  Basemap: {}", config.basemap.label());
    println!("  Center: {:?}, zoom {}", config.center, config.zoom);
    println!("  Legend: {}", config.legend_position.as_str());
    println!("  Output: {}", config.html_path.display());
    println!();
    timer.phase("PHASE 1: Configuration");

    let source = FileSource::new(quakes_file, plates_file);
    let output = pipeline::generate_map(&source, &config).await?;
    timer.phase("PHASE 2: Map generated");

    let written = pipeline::write_outputs(&output, Path::new("."))?;
    pipeline::log_summary(&output);
    timer.phase("PHASE 3: Outputs written");

    println!("\nWrote {} file(s):", written.len());
    for path in &written {
        println!("  {}", path.display());
    }
    if let Some(reason) = &output.summary.earthquakes_error {
        println!("  (earthquake layer empty: {})", reason);
    }
    if let Some(reason) = &output.summary.plates_error {
        println!("  (plate layer empty: {})", reason);
    }

    println!("\n=== Development Run Complete ({:.3}s) ===", timer.elapsed().as_secs_f64());
    Ok(())
}

/// Load configuration from map_config.json if it exists
fn load_dev_config() -> anyhow::Result<MapConfig> {
    let mut props = PropertyReader::from_env();

    match std::fs::read_to_string(DEV_CONFIG_FILE) {
        Ok(json) => {
            props
                .merge_json(&json)
                .with_context(|| format!("Failed to parse {}", DEV_CONFIG_FILE))?;
            println!("  Using overrides from {}", DEV_CONFIG_FILE);
        }
        Err(_) => println!("  No {} found, using defaults", DEV_CONFIG_FILE),
    }

    Ok(MapConfig::from_properties(&props))
}
