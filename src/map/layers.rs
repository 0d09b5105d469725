//! Basemap tile layers
//!
//! The four background layers offered in the layer control, with the tile
//! URL templates and attributions their providers require.

use serde::Serialize;

const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const STAMEN_ATTRIBUTION: &str = "Map tiles by <a href=\"http://stamen.com\">Stamen Design</a>, \
<a href=\"http://creativecommons.org/licenses/by/3.0\">CC BY 3.0</a> &mdash; \
Map data &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const TOPO_ATTRIBUTION: &str = "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, \
<a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; \
<a href=\"https://opentopomap.org\">OpenTopoMap</a> \
(<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)";

/// Available basemaps, in layer control order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Basemap {
    #[default]
    Default,
    Grayscale,
    WaterColor,
    Topography,
}

impl Basemap {
    pub const ALL: [Basemap; 4] = [
        Basemap::Default,
        Basemap::Grayscale,
        Basemap::WaterColor,
        Basemap::Topography,
    ];

    /// Parse from a property value (case-insensitive); unknown → Default
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }

    /// Name shown in the layer control
    pub fn label(&self) -> &'static str {
        match self {
            Basemap::Default => "Default",
            Basemap::Grayscale => "Grayscale",
            Basemap::WaterColor => "Water Color",
            Basemap::Topography => "Topography",
        }
    }

    pub fn tile_layer(&self) -> TileLayer {
        match self {
            Basemap::Default => TileLayer {
                name: self.label(),
                url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                attribution: OSM_ATTRIBUTION,
                subdomains: None,
                min_zoom: None,
                max_zoom: 19,
                ext: None,
            },
            Basemap::Grayscale => TileLayer {
                name: self.label(),
                url_template:
                    "https://stamen-tiles-{s}.a.ssl.fastly.net/toner-lite/{z}/{x}/{y}{r}.{ext}",
                attribution: STAMEN_ATTRIBUTION,
                subdomains: Some("abcd"),
                min_zoom: Some(0),
                max_zoom: 20,
                ext: Some("png"),
            },
            Basemap::WaterColor => TileLayer {
                name: self.label(),
                url_template: "https://stamen-tiles-{s}.a.ssl.fastly.net/watercolor/{z}/{x}/{y}.{ext}",
                attribution: STAMEN_ATTRIBUTION,
                subdomains: Some("abcd"),
                min_zoom: Some(1),
                max_zoom: 16,
                ext: Some("jpg"),
            },
            Basemap::Topography => TileLayer {
                name: self.label(),
                url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
                attribution: TOPO_ATTRIBUTION,
                subdomains: None,
                min_zoom: None,
                max_zoom: 17,
                ext: None,
            },
        }
    }
}

/// A raster tile layer as the page's mapping library expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<u8>,
    pub max_zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<&'static str>,
}

impl TileLayer {
    /// Whether the layer has tiles at a zoom level
    pub fn supports_zoom(&self, zoom: f64) -> bool {
        zoom >= f64::from(self.min_zoom.unwrap_or(0)) && zoom <= f64::from(self.max_zoom)
    }
}
