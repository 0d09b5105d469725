//! Map configuration from properties
//!
//! Configuration is loaded from map properties (defined in map.json).
//! Defaults come from map.json via `PropertyReader`; user values are
//! layered on top by the binaries (flags, map_config.json, environment).

use crate::encoding::ColorToken;
use crate::map::{Basemap, LegendPosition};
use crate::properties::{parse_lat_lon, registry, PropertyReader};
use std::path::PathBuf;
use std::time::Duration;

/// Used only if map.json itself carries an unusable center
const FALLBACK_CENTER: (f64, f64) = (36.7783, -119.4179);

#[derive(Debug, Clone)]
pub struct MapConfig {
    /// GeoJSON feed of earthquake events
    pub earthquakes_url: String,

    /// GeoJSON feed of plate boundaries
    pub plates_url: String,

    /// Per-request HTTP timeout
    pub timeout: Duration,

    /// Initial center as (lat, lon)
    pub center: (f64, f64),

    /// Initial zoom level
    pub zoom: f64,

    /// Basemap shown at load
    pub basemap: Basemap,

    /// Page title
    pub title: String,

    /// Corner holding the depth legend
    pub legend_position: LegendPosition,

    /// Plate boundary line color
    pub plate_color: ColorToken,

    /// Plate boundary line weight
    pub plate_weight: f64,

    /// Where the map page is written
    pub html_path: PathBuf,

    /// Where the styled GeoJSON is written (None = not written)
    pub geojson_path: Option<PathBuf>,
}

impl MapConfig {
    /// Create config from map properties
    pub fn from_properties(props: &PropertyReader) -> Self {
        let earthquakes_url = props.get_string("feed.earthquakes.url");
        let plates_url = props.get_string("feed.plates.url");

        let timeout =
            Duration::from_secs_f64(props.get_f64_in_range("feed.timeout.seconds", 1.0, 600.0));

        // Center: user value if valid, else map.json default
        let center = props.get_lat_lon("map.center").unwrap_or_else(|| {
            registry()
                .get_default("map.center")
                .and_then(parse_lat_lon)
                .unwrap_or(FALLBACK_CENTER)
        });

        let zoom = props.get_f64_in_range("map.zoom", 0.0, 20.0);

        let basemap = Basemap::parse(&props.get_enum("map.basemap"));

        let title = props.get_string("map.title");

        let legend_position = LegendPosition::parse(&props.get_enum("legend.position"));

        // Plate color: CSS color name or hex
        let mut plate_color = ColorToken::new(props.get_string("plates.color"));
        if !plate_color.is_valid() {
            let default = registry().get_default("plates.color").unwrap_or("yellow");
            tracing::warn!(
                "Plate color '{}' is not a CSS color name or hex value. Using default: '{}'",
                plate_color,
                default
            );
            plate_color = ColorToken::new(default);
        }

        let plate_weight = props.get_f64_in_range("plates.weight", 0.0, 20.0);

        let html_path = PathBuf::from(props.get_string("output.html"));
        let geojson_path = props.get_optional_string("output.geojson").map(PathBuf::from);

        Self {
            earthquakes_url,
            plates_url,
            timeout,
            center,
            zoom,
            basemap,
            title,
            legend_position,
            plate_color,
            plate_weight,
            html_path,
            geojson_path,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::new())
    }
}
