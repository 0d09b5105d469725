//! Earthquake Map - main entry point
//!
//! Downloads the earthquake and plate boundary feeds and writes the map page.
//!
//! Usage:
//! ```bash
//! quake_map --out maps/week.html --geojson maps/week.geojson --basemap Grayscale
//! ```
//!
//! Property precedence (lowest first): map.json defaults, `QUAKE_MAP_*`
//! environment variables, the `--config` JSON file, command-line flags.

use anyhow::{bail, Context};
use quake_map::config::MapConfig;
use quake_map::feeds::LiveSource;
use quake_map::logging;
use quake_map::pipeline;
use quake_map::properties::PropertyReader;
use std::path::{Path, PathBuf};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Command-line options
#[derive(Debug, Default)]
struct CliArgs {
    /// Property overrides from flags
    overrides: PropertyReader,
    config_file: Option<PathBuf>,
    verbose: bool,
    debug: bool,
    version: bool,
}

/// Parse command-line arguments into property overrides
fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        let property = match args[i].as_str() {
            "--quakes" => Some("feed.earthquakes.url"),
            "--plates" => Some("feed.plates.url"),
            "--out" => Some("output.html"),
            "--geojson" => Some("output.geojson"),
            "--basemap" => Some("map.basemap"),
            "--config" => None,
            "--verbose" | "-v" => {
                cli.verbose = true;
                i += 1;
                continue;
            }
            "--debug" => {
                cli.debug = true;
                i += 1;
                continue;
            }
            "--version" | "-V" => {
                cli.version = true;
                i += 1;
                continue;
            }
            other => bail!("Unknown argument: {}", other),
        };

        let Some(value) = args.get(i + 1) else {
            bail!("Missing value for {}", args[i]);
        };
        match property {
            Some(name) => cli.overrides.set(name, value.as_str()),
            None => cli.config_file = Some(PathBuf::from(value)),
        }
        i += 2;
    }
    Ok(cli)
}

/// Layer env vars, the config file and flags over the map.json defaults
fn load_properties(cli: CliArgs) -> anyhow::Result<PropertyReader> {
    let mut props = PropertyReader::from_env();

    if let Some(path) = &cli.config_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        props
            .merge_json(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    }

    props.merge(cli.overrides);
    Ok(props)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args)?;

    if cli.version {
        println!("quake_map {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(logging::default_level(cli.verbose, cli.debug));
    tracing::info!("Earthquake Map v{}", env!("CARGO_PKG_VERSION"));

    let props = load_properties(cli)?;
    let config = MapConfig::from_properties(&props);
    tracing::info!("Configuration loaded");
    tracing::info!("  Earthquakes: {}", config.earthquakes_url);
    tracing::info!("  Plates: {}", config.plates_url);
    tracing::info!("  Timeout: {:?}", config.timeout);

    let source = LiveSource::from_config(&config).context("Failed to create feed client")?;

    let output = pipeline::generate_map(&source, &config)
        .await
        .context("Map generation failed")?;

    let written =
        pipeline::write_outputs(&output, Path::new(".")).context("Failed to write outputs")?;
    pipeline::log_summary(&output);

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("quake_map")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_flags_become_properties() {
        let cli = parse_args(&args(&[
            "--out",
            "maps/week.html",
            "--basemap",
            "grayscale",
            "--debug",
        ]))
        .unwrap();
        assert!(cli.debug);
        assert!(!cli.verbose);

        let config = MapConfig::from_properties(&cli.overrides);
        assert_eq!(config.html_path, PathBuf::from("maps/week.html"));
        assert_eq!(config.basemap.label(), "Grayscale");
    }

    #[test]
    fn test_config_flag_and_errors() {
        let cli = parse_args(&args(&["--config", "settings.json", "-V"])).unwrap();
        assert_eq!(cli.config_file, Some(PathBuf::from("settings.json")));
        assert!(cli.version);

        assert!(parse_args(&args(&["--out"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_config_file_below_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"map.zoom": 3, "output.html": "from_file.html"}"#).unwrap();

        let cli = parse_args(&args(&[
            "--config",
            path.to_str().unwrap(),
            "--out",
            "from_flag.html",
        ]))
        .unwrap();
        let config = MapConfig::from_properties(&load_properties(cli).unwrap());
        assert_eq!(config.zoom, 3.0);
        assert_eq!(config.html_path, PathBuf::from("from_flag.html"));
    }
}
