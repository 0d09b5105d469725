//! Map composition and rendering
//!
//! - `spec.rs`: `MapSpec`, the composed description of the map
//! - `layers.rs`: basemap tile layers
//! - `legend.rs`: depth legend
//! - `popup.rs`: marker popup text
//! - `render.rs`: styled GeoJSON and the HTML page
//! - `artifact.rs`: output files

pub mod artifact;
pub mod layers;
pub mod legend;
pub mod popup;
pub mod render;
pub mod spec;

pub use artifact::MapArtifact;
pub use layers::{Basemap, TileLayer};
pub use legend::{Legend, LegendPosition};
pub use popup::popup_text;
pub use render::{encode_markers, render_html, render_styled_geojson, Marker};
pub use spec::{build_map_spec, MapSpec, Overlay, Viewport};
