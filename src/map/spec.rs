//! Map composition
//!
//! Everything the page needs besides the feature data: basemaps, the
//! initial viewport, the two overlays and the legend. Built once from the
//! configuration and handed to the renderer.

use super::layers::{Basemap, TileLayer};
use super::legend::Legend;
use crate::config::MapConfig;
use crate::encoding::{ColorToken, DepthScale};
use serde::Serialize;

pub const PLATES_OVERLAY: &str = "Tectonic Plates";
pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";

/// Initial map position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// [lat, lon]
    pub center: [f64; 2],
    pub zoom: f64,
}

/// Line style for GeoJSON line overlays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: ColorToken,
    pub weight: f64,
}

/// A toggleable overlay in the layer control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub name: &'static str,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

/// Complete description of the map, minus the feature data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSpec {
    pub title: String,
    pub basemaps: Vec<TileLayer>,
    pub active_basemap: &'static str,
    pub viewport: Viewport,
    pub plates: Overlay,
    pub earthquakes: Overlay,
    pub legend: Legend,
}

impl MapSpec {
    /// Tile layer shown when the page loads
    pub fn active_tile_layer(&self) -> Option<&TileLayer> {
        self.basemaps.iter().find(|b| b.name == self.active_basemap)
    }
}

/// Compose the map from configuration
pub fn build_map_spec(config: &MapConfig) -> MapSpec {
    let basemaps: Vec<TileLayer> = Basemap::ALL.iter().map(Basemap::tile_layer).collect();

    let active = config.basemap.tile_layer();
    if !active.supports_zoom(config.zoom) {
        tracing::warn!(
            "Basemap '{}' has no tiles at zoom {} (range {}-{})",
            active.name,
            config.zoom,
            active.min_zoom.unwrap_or(0),
            active.max_zoom
        );
    }

    MapSpec {
        title: config.title.clone(),
        basemaps,
        active_basemap: config.basemap.label(),
        viewport: Viewport {
            center: [config.center.0, config.center.1],
            zoom: config.zoom,
        },
        plates: Overlay {
            name: PLATES_OVERLAY,
            enabled: true,
            line_style: Some(LineStyle {
                color: config.plate_color.clone(),
                weight: config.plate_weight,
            }),
        },
        earthquakes: Overlay {
            name: EARTHQUAKES_OVERLAY,
            enabled: true,
            line_style: None,
        },
        legend: Legend::from_scale(DepthScale::standard(), config.legend_position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::legend::LegendPosition;
    use crate::properties::PropertyReader;

    #[test]
    fn test_default_map_spec() {
        let spec = build_map_spec(&MapConfig::default());

        let names: Vec<&str> = spec.basemaps.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Default", "Grayscale", "Water Color", "Topography"]);
        assert_eq!(spec.active_basemap, "Default");
        assert_eq!(spec.active_tile_layer().map(|t| t.max_zoom), Some(19));

        assert_eq!(spec.viewport.center, [36.7783, -119.4179]);
        assert_eq!(spec.viewport.zoom, 5.0);

        assert_eq!(spec.plates.name, "Tectonic Plates");
        let plate_style = spec.plates.line_style.as_ref().unwrap();
        assert_eq!(plate_style.color.as_str(), "yellow");
        assert_eq!(plate_style.weight, 1.0);
        assert_eq!(spec.earthquakes.name, "Earthquakes");
        assert!(spec.earthquakes.line_style.is_none());

        assert_eq!(spec.legend.position, LegendPosition::BottomRight);
        assert_eq!(spec.legend.intervals.len(), 6);
    }

    #[test]
    fn test_map_spec_follows_config() {
        let props = PropertyReader::from_pairs([
            ("map.basemap", "Water Color"),
            ("legend.position", "topleft"),
            ("map.center", "-33.9,151.2"),
        ]);
        let spec = build_map_spec(&MapConfig::from_properties(&props));

        assert_eq!(spec.active_basemap, "Water Color");
        assert_eq!(spec.legend.position, LegendPosition::TopLeft);
        assert_eq!(spec.viewport.center, [-33.9, 151.2]);
    }

    #[test]
    fn test_map_spec_json_shape() {
        let value = serde_json::to_value(build_map_spec(&MapConfig::default())).unwrap();
        assert_eq!(value["activeBasemap"], "Default");
        assert_eq!(value["plates"]["lineStyle"]["color"], "yellow");
        assert_eq!(value["legend"]["position"], "bottomright");
        assert_eq!(value["legend"]["intervals"][5]["label"], "90+");
        assert!(value["earthquakes"].get("lineStyle").is_none());
    }
}
