//! Shared map generation pipeline
//!
//! Used by both the production (main.rs) and development (dev.rs) entry
//! points. The pipeline:
//! 1. Fetches the earthquake and plate feeds concurrently
//! 2. Parses earthquake features into events
//! 3. Encodes each event into a styled marker
//! 4. Composes the map spec
//! 5. Renders the output artifacts
//!
//! A feed that fails leaves its layer empty; there is no retry. Only when
//! both feeds fail is there nothing to draw.

use crate::config::MapConfig;
use crate::encoding::DepthScale;
use crate::feeds::{parse_earthquakes, FeatureCollection, FeedError, FeedSource};
use crate::map::{
    build_map_spec, encode_markers, render_html, render_styled_geojson, MapArtifact, MapSpec,
    Marker,
};
use crate::profile::PhaseTimer;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Errors that stop map generation
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Neither feed could be loaded
    #[error("No data to map: earthquakes: {earthquakes}; plates: {plates}")]
    NoData {
        earthquakes: FeedError,
        plates: FeedError,
    },

    /// Serializing the page data failed
    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),

    /// Writing an artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSummary {
    /// Events drawn as markers
    pub events: usize,
    /// Earthquake features dropped by validation
    pub skipped: usize,
    /// Plate boundary features drawn
    pub plate_features: usize,
    /// Markers per depth bucket, shallowest first (same order as the legend)
    pub bucket_counts: Vec<usize>,
    /// Why the earthquake layer is empty, if its fetch failed
    pub earthquakes_error: Option<String>,
    /// Why the plate layer is empty, if its fetch failed
    pub plates_error: Option<String>,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct MapOutput {
    pub spec: MapSpec,
    pub markers: Vec<Marker>,
    pub artifacts: Vec<MapArtifact>,
    pub summary: PipelineSummary,
}

/// Keep a fetched layer, or log the failure and use an empty one
fn layer_or_empty(
    name: &str,
    fetched: Result<FeatureCollection, FeedError>,
) -> (FeatureCollection, Option<String>) {
    match fetched {
        Ok(collection) => {
            info!("  {}: {} features", name, collection.len());
            (collection, None)
        }
        Err(e) => {
            error!("  {}: fetch failed, layer will be empty: {}", name, e);
            (FeatureCollection::empty(), Some(e.to_string()))
        }
    }
}

/// Generate the map from a feed source
pub async fn generate_map<S: FeedSource>(
    source: &S,
    config: &MapConfig,
) -> Result<MapOutput, PipelineError> {
    let mut timer = PhaseTimer::start("generate_map START");

    info!("[1/5] Fetching feeds from {}", source.describe());
    let (quakes, plates) = futures::join!(source.earthquakes(), source.plate_boundaries());
    let ((quake_collection, earthquakes_error), (plate_collection, plates_error)) =
        match (quakes, plates) {
            (Err(earthquakes), Err(plates)) => {
                return Err(PipelineError::NoData {
                    earthquakes,
                    plates,
                })
            }
            (quakes, plates) => (
                layer_or_empty("earthquakes", quakes),
                layer_or_empty("plates", plates),
            ),
        };
    timer.phase("feeds fetched");

    info!("[2/5] Parsing earthquake features...");
    let parsed = parse_earthquakes(&quake_collection);
    info!(
        "  {} events, {} features skipped",
        parsed.events.len(),
        parsed.skipped
    );
    timer.phase("features parsed");

    info!("[3/5] Encoding markers...");
    let markers = encode_markers(parsed.events);
    let scale = DepthScale::standard();
    let mut bucket_counts = vec![0usize; scale.len()];
    for marker in &markers {
        if let Some(count) = bucket_counts.get_mut(scale.bucket_index(marker.event.depth_km)) {
            *count += 1;
        }
    }
    timer.phase("markers encoded");

    info!("[4/5] Composing map...");
    let spec = build_map_spec(config);
    info!(
        "  Basemap: {}, center: ({}, {}), zoom: {}",
        spec.active_basemap, spec.viewport.center[0], spec.viewport.center[1], spec.viewport.zoom
    );

    info!("[5/5] Rendering outputs...");
    let mut artifacts = Vec::with_capacity(2);
    let html = render_html(&spec, &markers, &plate_collection)?;
    artifacts.push(MapArtifact::html(&config.html_path, html));
    if let Some(geojson_path) = &config.geojson_path {
        let geojson = serde_json::to_string(&render_styled_geojson(&markers))?;
        artifacts.push(MapArtifact::geojson(geojson_path, geojson));
    }
    timer.phase("outputs rendered");

    let summary = PipelineSummary {
        events: markers.len(),
        skipped: parsed.skipped,
        plate_features: plate_collection.len(),
        bucket_counts,
        earthquakes_error,
        plates_error,
    };

    Ok(MapOutput {
        spec,
        markers,
        artifacts,
        summary,
    })
}

/// Write every artifact under `base`; returns the written paths
pub fn write_outputs(output: &MapOutput, base: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut written = Vec::with_capacity(output.artifacts.len());
    for artifact in &output.artifacts {
        let path = artifact.write_to(base)?;
        info!(
            "✓ Saved {} ({} bytes, {})",
            path.display(),
            artifact.bytes.len(),
            artifact.content_type
        );
        written.push(path);
    }
    Ok(written)
}

/// Log the run summary, one line per legend row
pub fn log_summary(output: &MapOutput) {
    let summary = &output.summary;
    info!(
        "Markers: {} ({} skipped), plate features: {}",
        summary.events, summary.skipped, summary.plate_features
    );
    for (interval, count) in output.spec.legend.intervals.iter().zip(&summary.bucket_counts) {
        info!("  {:>14} {:>6}  ({})", interval.label, count, interval.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::FileSource;
    use crate::properties::PropertyReader;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn fixture_source() -> FileSource {
        FileSource::new(fixture("all_week_sample.geojson"), fixture("plates_sample.json"))
    }

    #[tokio::test]
    async fn test_generate_map_from_fixtures() {
        let output = generate_map(&fixture_source(), &MapConfig::default())
            .await
            .unwrap();

        assert_eq!(output.summary.events, 6);
        assert_eq!(output.summary.skipped, 1);
        assert_eq!(output.summary.plate_features, 2);
        assert_eq!(output.summary.bucket_counts, vec![2, 1, 0, 1, 1, 1]);
        assert_eq!(output.summary.earthquakes_error, None);

        // Feed order preserved
        let first = &output.markers[0];
        assert_eq!(first.event.id.as_deref(), Some("ci40000001"));
        assert_eq!(first.style.fill_color.as_str(), "#cafc03");

        assert_eq!(output.artifacts.len(), 1);
        let html = String::from_utf8(output.artifacts[0].bytes.clone()).unwrap();
        assert!(html.contains("90+"));
        assert!(html.contains("ci40000001"));
        assert!(html.contains("\"name\":\"Tectonic Plates\""));
    }

    #[tokio::test]
    async fn test_geojson_artifact_when_configured() {
        let props = PropertyReader::from_pairs([("output.geojson", "styled.geojson")]);
        let config = MapConfig::from_properties(&props);
        let output = generate_map(&fixture_source(), &config).await.unwrap();

        assert_eq!(output.artifacts.len(), 2);
        let geojson: serde_json::Value =
            serde_json::from_slice(&output.artifacts[1].bytes).unwrap();
        assert_eq!(geojson["features"].as_array().unwrap().len(), 6);

        let dir = tempfile::tempdir().unwrap();
        let written = write_outputs(&output, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("earthquake_map.html").exists());
        assert!(dir.path().join("styled.geojson").exists());
    }

    #[tokio::test]
    async fn test_missing_plates_still_renders_earthquakes() {
        let source = FileSource::new(fixture("all_week_sample.geojson"), fixture("missing.json"));
        let output = generate_map(&source, &MapConfig::default()).await.unwrap();

        assert_eq!(output.summary.events, 6);
        assert_eq!(output.summary.plate_features, 0);
        assert!(output.summary.plates_error.is_some());
    }

    #[tokio::test]
    async fn test_missing_earthquakes_renders_plates_only() {
        let source = FileSource::new(fixture("missing.geojson"), fixture("plates_sample.json"));
        let output = generate_map(&source, &MapConfig::default()).await.unwrap();

        assert_eq!(output.summary.events, 0);
        assert_eq!(output.summary.plate_features, 2);
        assert!(output.summary.earthquakes_error.is_some());
    }

    #[tokio::test]
    async fn test_both_feeds_missing_is_an_error() {
        let source = FileSource::new(fixture("missing.geojson"), fixture("missing.json"));
        let err = generate_map(&source, &MapConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoData { .. }));
    }
}
